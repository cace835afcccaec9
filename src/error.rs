use thiserror::Error;

use crate::constantes::{ERROR_RED, ERROR_SESION_EXPIRADA, ERROR_SIN_SESION, ERROR_VALIDACION};
use crate::validacion::ErroresFormulario;

/// Fallas al hablar con los servicios remotos
#[derive(Error, Debug)]
pub enum ApiError {
    /// Respuesta no exitosa; el mensaje sale del cuerpo o de un texto por defecto
    #[error("{mensaje}")]
    Http { status: u16, mensaje: String },

    #[error("{}", ERROR_RED)]
    Conexion(#[from] reqwest::Error),

    #[error("Respuesta inválida del servidor: {0}")]
    RespuestaInvalida(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Fallas del almacenamiento local de la sesión
#[derive(Error, Debug)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Otro hilo entró en pánico con la conexión tomada
    #[error("almacenamiento bloqueado: {0}")]
    Bloqueo(String),
}

/// Errores que ve el usuario al ejecutar una operación
#[derive(Error, Debug)]
pub enum AppError {
    /// Campos inválidos; nunca llega a enviarse nada al servidor
    #[error("{}", ERROR_VALIDACION)]
    Validacion(ErroresFormulario),

    #[error("{}", ERROR_SESION_EXPIRADA)]
    SesionExpirada,

    #[error("{}", ERROR_SIN_SESION)]
    SinSesion,

    #[error("{0}")]
    Api(#[from] ApiError),

    /// Invariante rota del lado del cliente (por ejemplo, borrar algo sin id)
    #[error("{0}")]
    Invariante(String),

    #[error("Error de almacenamiento local: {0}")]
    Almacenamiento(#[from] DbError),

    #[error("Error al serializar la salida: {0}")]
    Serializacion(#[from] serde_json::Error),
}
