use clap::Parser;

use cors_preview::calc::format_result;
use cors_preview::cli::CalcArgs;

fn main() {
    // Invalid operators or operands exit with usage and status 2 here
    let args = CalcArgs::parse();
    let result = args.operation.apply(args.op1, args.op2);
    println!("{}", format_result(result));
}
