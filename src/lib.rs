pub mod cli;
pub mod commands;
pub mod config;
pub mod constantes;
pub mod db;
pub mod error;
pub mod listado;
pub mod models;
pub mod servicios;
pub mod sesion;
pub mod token;
pub mod utils;
pub mod validacion;

use serde_json::Value;
use tracing::warn;

use cli::{Cli, Comando};
use commands::Estado;
use config::Config;
use error::AppError;
use models::EstadoToken;

/// Arma el estado y ejecuta el subcomando pedido
pub async fn run(cli: Cli) -> Result<Value, AppError> {
    let estado = Estado::new(Config::load())?;
    ejecutar_con_estado(&estado, cli.comando).await
}

/// Un token vencido al arrancar se borra y se informa antes de seguir,
/// salvo en los comandos que crean o cierran la sesión.
pub async fn ejecutar_con_estado(estado: &Estado, comando: Comando) -> Result<Value, AppError> {
    let inicia_sesion = matches!(
        comando,
        Comando::Login { .. } | Comando::Registrar { .. } | Comando::Logout
    );

    if sesion::verificar_token_almacenado(&estado.db)? == EstadoToken::Expirado && !inicia_sesion {
        warn!("La sesión guardada expiró");
        return Err(AppError::SesionExpirada);
    }

    cli::ejecutar(estado, comando).await
}
