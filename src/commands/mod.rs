pub mod actividades;
pub mod busqueda;
pub mod sesion;
pub mod usuarios;

use tracing::warn;

use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::servicios::{
    construir_cliente, BuscadorActividades, ServicioActividades, ServicioBusqueda,
    ServicioUsuarios,
};
use crate::token;

/// Estado compartido por todos los comandos
pub struct Estado {
    pub db: Database,
    pub config: Config,
    pub actividades: ServicioActividades,
    pub usuarios: ServicioUsuarios,
    pub buscador: BuscadorActividades,
}

impl Estado {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let db = Database::new(&config.db_path)?;
        Self::con_base_de_datos(config, db)
    }

    pub fn con_base_de_datos(config: Config, db: Database) -> Result<Self, AppError> {
        let client = construir_cliente(config.timeout())?;
        Ok(Self {
            actividades: ServicioActividades::new(&config.activities_url, client.clone()),
            usuarios: ServicioUsuarios::new(&config.users_url, client.clone()),
            buscador: BuscadorActividades::new(ServicioBusqueda::new(&config.search_url, client)),
            db,
            config,
        })
    }
}

/// Token vigente para una llamada autenticada. Un token vencido se borra.
pub(crate) fn token_requerido(db: &Database) -> Result<String, AppError> {
    let token = db.obtener_token()?.ok_or(AppError::SinSesion)?;
    if token::esta_expirado(&token) {
        warn!("Token expirado al invocar una operación autenticada");
        db.limpiar_sesion()?;
        return Err(AppError::SesionExpirada);
    }
    Ok(token)
}

/// Token vigente más el id de usuario que trae
pub(crate) fn usuario_requerido(db: &Database) -> Result<(String, i64), AppError> {
    let token = token_requerido(db)?;
    let id = token::decodificar(&token)
        .and_then(|c| c.id_usuario)
        .ok_or(AppError::SinSesion)?;
    Ok((token, id))
}
