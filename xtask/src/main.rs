use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for mazeworks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt, clippy, tests under both seed modes, then docs
    Check,
    Fmt,
    Clippy,
    /// Run tests with entropy seeding and again with `deterministic-rng`
    Test,
    /// Run the generator benchmarks in release mode
    Bench,
    Doc,
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("{label} failed");
    }
    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("tests", &["test", "--workspace"])?;
    cargo(
        "deterministic tests",
        &["test", "-p", "mazeworks-gen", "--features", "deterministic-rng"],
    )
}

fn doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test()?;
            doc()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Bench => cargo(
            "bench",
            &["bench", "-p", "mazeworks-gen", "--bench", "bench_generators"],
        )?,
        Commands::Doc => doc()?,
    }
    Ok(())
}
