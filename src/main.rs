use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use gimnasio_cliente::cli::Cli;
use gimnasio_cliente::error::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout queda reservado para el JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match gimnasio_cliente::run(cli).await {
        Ok(salida) => match serde_json::to_string_pretty(&salida) {
            Ok(texto) => {
                println!("{}", texto);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        Err(AppError::Validacion(errores)) => {
            eprintln!("{}", AppError::Validacion(Default::default()));
            match serde_json::to_string_pretty(&errores) {
                Ok(texto) => eprintln!("{}", texto),
                Err(_) => eprintln!("{:?}", errores),
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
