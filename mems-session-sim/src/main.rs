use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use mems_session_sim::{HostConfig, LogDelegate};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match HostConfig::load(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let delegate = Arc::new(LogDelegate::new());
    match mems_session_sim::run(&config, delegate.clone()) {
        Ok(Some(report)) => {
            println!("session   {}", report.session_id);
            println!("rows      {}", report.row_count);
            println!("archive   {}", report.archive_path.display());
            println!("sha256    {}", report.checksum);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("session stopped without export");
            for error in delegate.errors() {
                println!("  {}", error);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
