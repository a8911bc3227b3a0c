use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};
use rpn_calc::error::format_error_with_context;
use rpn_calc::{CalcError, lexer, parser, evaluator};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = "Enter the expression: ";

fn print_usage() {
    println!("rpncalc v{}", VERSION);
    println!("Usage: rpncalc [options] [expression]");
    println!("");
    println!("Options:");
    println!("  --tokens              只进行词法分析并打印 token");
    println!("  --postfix             在结果之前打印后缀（逆波兰）形式");
    println!("  --version, -v         显示版本号");
    println!("  --help, -h            显示帮助信息");
    println!("");
    println!("Without an expression rpncalc starts an interactive session (Ctrl-D to quit).");
    println!("");
    println!("Examples:");
    println!("  rpncalc");
    println!("  rpncalc \"2 + 3 * 4\"");
    println!("  rpncalc --postfix \"(2 + 3) * 4\"");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Stage {
    TokensOnly,
    #[default]
    Full,
}

#[derive(Debug, Default)]
struct ReplOptions {
    stage: Stage,
    show_postfix: bool,
    expression: Option<String>,
}

fn parse_args(args: &[String]) -> Result<ReplOptions, String> {
    let mut options = ReplOptions::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("rpncalc v{}", VERSION);
                process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--tokens" => {
                options.stage = Stage::TokensOnly;
            }
            "--postfix" => {
                options.show_postfix = true;
            }
            _ => {
                // 表达式本身不会以 '-' 开头（不支持一元负号）
                if arg.starts_with('-') {
                    return Err(format!("Unknown option: {}", arg));
                }
                if options.expression.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                options.expression = Some(arg.clone());
            }
        }
    }

    Ok(options)
}

/// 对单个表达式运行管线，返回要打印的各行
fn run(expression: &str, options: &ReplOptions) -> Result<Vec<String>, CalcError> {
    let mut lines = Vec::new();

    let tokens = lexer::tokenize(expression)?;
    if options.stage == Stage::TokensOnly {
        let rendered: Vec<String> = tokens.iter().map(|t| t.token.to_string()).collect();
        lines.push(format!("Tokens: {}", rendered.join(" ")));
        return Ok(lines);
    }

    let postfix = parser::to_postfix(&tokens)?;
    if options.show_postfix {
        lines.push(format!("Postfix: {}", postfix));
    }

    let value = evaluator::evaluate_postfix(&postfix.tokens)?;
    lines.push(format!("Result: {}", value));
    Ok(lines)
}

/// 打印结果或错误，返回是否成功
fn report(expression: &str, options: &ReplOptions, out: &mut impl Write) -> Result<bool> {
    match run(expression, options) {
        Ok(lines) => {
            for line in lines {
                writeln!(out, "{}", line)?;
            }
            Ok(true)
        }
        Err(e) => {
            log::debug!("evaluation of {:?} failed: {:?}", expression, e);
            writeln!(out, "{}", format_error_with_context(&e, expression))?;
            Ok(false)
        }
    }
}

fn repl(options: &ReplOptions) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush().context("failed to flush stdout")?;

        line.clear();
        let read = input.read_line(&mut line).context("failed to read from stdin")?;
        if read == 0 {
            // EOF
            writeln!(stdout)?;
            return Ok(());
        }

        let expression = line.trim_end_matches(['\n', '\r']);
        report(expression, options, &mut stdout)?;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    match &options.expression {
        Some(expression) => {
            let ok = report(expression, &options, &mut io::stdout())?;
            if !ok {
                process::exit(1);
            }
            Ok(())
        }
        None => repl(&options),
    }
}
