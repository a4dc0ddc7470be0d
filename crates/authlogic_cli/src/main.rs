use anyhow::Result;
use authlogic_diagnostics::{DiagnosticSink, Emitter};
use authlogic_driver::{
    check_file, check_files, merge_units, read_source, DriverError, SourceUnit,
};
use authlogic_syntax::{tokenize, ParseError};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "authlogic")]
#[command(about = "授权逻辑前端 - 词法、语法检查与格式化", version)]
struct Cli {
    /// 关闭彩色输出
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 检查语法错误
    Check {
        /// 输入文件
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// 打印合并后的 AST
    Ast {
        /// 输入文件
        #[arg(required = true)]
        inputs: Vec<String>,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 以规范格式打印源文件
    Fmt {
        /// 输入文件
        input: String,
    },

    /// 打印词法单元序列
    Tokens {
        /// 输入文件
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    if cli.no_color {
        colored::control::set_override(false);
    }
    let emitter = if cli.no_color {
        Emitter::without_colors()
    } else {
        Emitter::new()
    };

    match cli.command {
        Commands::Check { inputs } => cmd_check(&inputs, &emitter)?,
        Commands::Ast { inputs, json } => cmd_ast(&inputs, json, &emitter)?,
        Commands::Fmt { input } => cmd_fmt(&input, &emitter)?,
        Commands::Tokens { input } => cmd_tokens(&input, &emitter)?,
    }

    Ok(())
}

/// 日志写到 stderr，级别由 AUTHLOGIC_LOG 控制
fn init_logging() {
    let filter = EnvFilter::try_from_env("AUTHLOGIC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 读取并解析输入文件，读取失败直接退出
fn load(inputs: &[String], emitter: &Emitter) -> Vec<SourceUnit> {
    match check_files(inputs) {
        Ok(units) => units,
        Err(e) => fail(&e, emitter),
    }
}

/// 输出驱动错误并以状态码 1 退出
fn fail(error: &DriverError, emitter: &Emitter) -> ! {
    let mut sink = DiagnosticSink::new();
    error.collect_to_sink(&mut sink);
    emitter.emit_all(sink.diagnostics());
    std::process::exit(1);
}

/// 输出所有单元的诊断，返回汇总
fn report(units: &[SourceUnit], emitter: &Emitter) -> Result<DiagnosticSink> {
    let mut sink = DiagnosticSink::new();
    for unit in units {
        unit.emit(emitter)?;
        unit.collect_to_sink(&mut sink);
    }
    Ok(sink)
}

/// 检查命令
fn cmd_check(inputs: &[String], emitter: &Emitter) -> Result<()> {
    tracing::debug!(files = inputs.len(), "checking");
    let units = load(inputs, emitter);
    let sink = report(&units, emitter)?;

    match merge_units(&units) {
        Ok(program) => {
            println!(
                "{} {} 个文件, {} 个条目 ({})",
                "✅ 无错误:".green(),
                units.len(),
                program.items.len(),
                sink.summary()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "❌ 发现错误:".red(), sink.summary());
            fail(&e, emitter)
        }
    }
}

/// AST 命令
fn cmd_ast(inputs: &[String], json: bool, emitter: &Emitter) -> Result<()> {
    let units = load(inputs, emitter);
    report(&units, emitter)?;

    let program = match merge_units(&units) {
        Ok(program) => program,
        Err(e) => fail(&e, emitter),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&program)?);
    } else {
        println!("{:#?}", program);
    }
    Ok(())
}

/// 格式化命令
fn cmd_fmt(input: &str, emitter: &Emitter) -> Result<()> {
    let unit = match check_file(input) {
        Ok(unit) => unit,
        Err(e) => fail(&e, emitter),
    };
    if report(std::slice::from_ref(&unit), emitter)?.has_errors() {
        std::process::exit(1);
    }

    print!("{}", unit.program);
    Ok(())
}

/// 词法单元命令
fn cmd_tokens(input: &str, emitter: &Emitter) -> Result<()> {
    let source = match read_source(input) {
        Ok(source) => source,
        Err(e) => fail(&e, emitter),
    };
    let lexed = tokenize(&source);

    for spanned in &lexed.tokens {
        println!(
            "{:>5}..{:<5} {:<12} {}",
            spanned.span.start,
            spanned.span.end,
            spanned.token.kind().map(|k| k.to_string()).unwrap_or_default(),
            spanned.token.lexeme()
        );
    }

    for err in lexed.errors {
        let diag = ParseError::from(err).to_diagnostic().with_file(input);
        emitter.emit_with_source(&diag, &source)?;
    }
    Ok(())
}
