use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::db::Database;
use crate::error::DbError;
use crate::models::{EstadoToken, SesionActual, USERNAME_POR_DEFECTO};
use crate::token;

/// Deriva la sesión a partir del token. Sin token, con token ilegible o
/// vencido se obtiene la sesión anónima.
pub fn derivar_sesion(token: Option<&str>, ahora: DateTime<Utc>) -> SesionActual {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return SesionActual::default();
    };

    if token::esta_expirado_en(token, ahora) {
        return SesionActual::default();
    }

    match token::decodificar(token) {
        Some(claims) => SesionActual {
            usuario_id: claims.id_usuario,
            logueado: true,
            es_admin: claims.is_admin.unwrap_or(false),
            username: claims
                .username
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| USERNAME_POR_DEFECTO.to_string()),
        },
        None => SesionActual::default(),
    }
}

/// Lee el token guardado y recalcula la sesión. Nunca se cachea.
pub fn sesion_actual(db: &Database) -> Result<SesionActual, DbError> {
    let token = db.obtener_token()?;
    Ok(derivar_sesion(token.as_deref(), Utc::now()))
}

pub fn verificar_token_almacenado(db: &Database) -> Result<EstadoToken, DbError> {
    verificar_token_almacenado_en(db, Utc::now())
}

/// Revisión al arrancar: un token vencido o ilegible se borra en el acto
pub fn verificar_token_almacenado_en(
    db: &Database,
    ahora: DateTime<Utc>,
) -> Result<EstadoToken, DbError> {
    let Some(token) = db.obtener_token()? else {
        debug!("Sin token almacenado");
        return Ok(EstadoToken::SinToken);
    };

    if token::esta_expirado_en(&token, ahora) {
        warn!("Token almacenado expirado o inválido; se cierra la sesión");
        db.limpiar_sesion()?;
        return Ok(EstadoToken::Expirado);
    }

    Ok(EstadoToken::Vigente)
}
