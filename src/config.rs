use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::db::Database;

pub const USERS_URL_POR_DEFECTO: &str = "http://localhost:8083";
pub const ACTIVITIES_URL_POR_DEFECTO: &str = "http://localhost:8084";
pub const SEARCH_URL_POR_DEFECTO: &str = "http://localhost:8085";
/// Sin timeout propio: se usa el del transporte
pub const TIMEOUT_POR_DEFECTO: u64 = 0;

/// URLs de los tres servicios y ajustes locales del cliente
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub users_url: String,
    pub activities_url: String,
    pub search_url: String,
    pub db_path: PathBuf,
    /// Segundos; 0 deja el timeout del transporte
    pub http_timeout_secs: u64,
}

impl Config {
    /// Variables de entorno en ejecución, luego las fijadas al compilar,
    /// luego los valores de desarrollo.
    pub fn load() -> Self {
        let db_por_defecto = Database::ruta_por_defecto().display().to_string();

        Self {
            users_url: try_load(
                "GIMNASIO_USERS_URL",
                option_env!("GIMNASIO_USERS_URL").unwrap_or(USERS_URL_POR_DEFECTO),
            ),
            activities_url: try_load(
                "GIMNASIO_ACTIVITIES_URL",
                option_env!("GIMNASIO_ACTIVITIES_URL").unwrap_or(ACTIVITIES_URL_POR_DEFECTO),
            ),
            search_url: try_load(
                "GIMNASIO_SEARCH_URL",
                option_env!("GIMNASIO_SEARCH_URL").unwrap_or(SEARCH_URL_POR_DEFECTO),
            ),
            db_path: PathBuf::from(try_load(
                "GIMNASIO_DB_PATH",
                option_env!("GIMNASIO_DB_PATH").unwrap_or(db_por_defecto.as_str()),
            )),
            http_timeout_secs: try_parse(
                "GIMNASIO_HTTP_TIMEOUT_SECS",
                option_env!("GIMNASIO_HTTP_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(TIMEOUT_POR_DEFECTO),
            ),
        }
    }

    /// Configuración apuntando a un único host, útil para pruebas locales
    pub fn con_base(base: &str, db_path: PathBuf) -> Self {
        Self {
            users_url: base.to_string(),
            activities_url: base.to_string(),
            search_url: base.to_string(),
            db_path,
            http_timeout_secs: 5,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.http_timeout_secs > 0).then(|| Duration::from_secs(self.http_timeout_secs))
    }
}

fn var(key: &str, default: &str) -> Option<String> {
    match env::var(key) {
        Ok(valor) => Some(valor.trim().to_string()),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            None
        }
    }
}

fn try_load(key: &str, default: &str) -> String {
    var(key, default).unwrap_or_else(|| default.to_string())
}

fn try_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(valor) = var(key, &default.to_string()) else {
        return default;
    };
    valor.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value: {e}, using default: {default}");
        default
    })
}
