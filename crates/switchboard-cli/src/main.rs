//! protoc-gen-switchboard
//!
//! protoc から起動されるプラグイン本体。
//!
//! - 引数なし: stdin の `CodeGeneratorRequest` を読み、stdout に `CodeGeneratorResponse` を書く
//! - `--version` / `-h` / `--help`: 表示して終了コード 0
//! - それ以外の引数: usage を stderr に出して終了コード 1

use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use switchboard_core::codegen;
use switchboard_core::observability::init_tracing;
use tracing::{debug, info};

/// protoc plugin that generates Switchboard service contracts and routers.
///
/// Run through protoc, e.g.
/// `protoc --switchboard_out=. --switchboard_opt=package_suffix=connect demo/echo.proto`
#[derive(Debug, Parser)]
#[command(name = "protoc-gen-switchboard", version)]
struct Cli {}

fn main() -> Result<ExitCode> {
    if let Err(err) = Cli::try_parse() {
        return match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print().context("failed to print to stdout")?;
                Ok(ExitCode::SUCCESS)
            }
            _ => {
                eprintln!("{}", Cli::command().render_usage());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    init_tracing();
    run_plugin()?;
    Ok(ExitCode::SUCCESS)
}

fn run_plugin() -> Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("failed to read CodeGeneratorRequest from stdin")?;
    let request =
        CodeGeneratorRequest::decode(input.as_slice()).context("failed to decode CodeGeneratorRequest")?;
    debug!(files = request.proto_file.len(), parameter = request.parameter(), "request received");

    let response = codegen::generate(&request);
    info!(
        generated = response.file.len(),
        failed = response.error.is_some(),
        "plugin finished"
    );

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .context("failed to write CodeGeneratorResponse to stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
