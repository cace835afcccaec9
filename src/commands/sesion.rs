use tracing::info;

use super::{token_requerido, Estado};
use crate::error::AppError;
use crate::models::{BorradorUsuario, Credenciales, EstadoToken, NuevoUsuario, SesionActual};
use crate::sesion;
use crate::token;
use crate::validacion::{validar_usuario, ErroresFormulario, ModoFormulario};

/// Inicia sesión y guarda el token. La sesión se deriva del token recibido.
pub async fn iniciar_sesion(
    estado: &Estado,
    username: &str,
    password: &str,
) -> Result<SesionActual, AppError> {
    let mut errores = ErroresFormulario::new();
    if username.trim().is_empty() {
        errores.insert("username".to_string(), "El nombre de usuario es requerido".to_string());
    }
    if password.is_empty() {
        errores.insert("password".to_string(), "La contraseña es requerida".to_string());
    }
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }

    let credenciales = Credenciales {
        username: username.trim().to_string(),
        password: password.to_string(),
    };
    let respuesta = estado.usuarios.login(&credenciales).await?;
    estado.db.guardar_token(&respuesta.access_token)?;

    let sesion = sesion::sesion_actual(&estado.db)?;
    info!("Sesión iniciada: {}", sesion.username);
    Ok(sesion)
}

/// Valida el formulario de registro antes de tocar la red
pub async fn registrar(
    estado: &Estado,
    borrador: &BorradorUsuario,
) -> Result<SesionActual, AppError> {
    let errores = validar_usuario(borrador, ModoFormulario::Crear);
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }

    let mut datos = NuevoUsuario::from(borrador);
    // El registro público nunca crea administradores
    datos.is_admin = false;

    let respuesta = estado.usuarios.registrar(&datos).await?;
    estado.db.guardar_token(&respuesta.access_token)?;
    sesion::sesion_actual(&estado.db).map_err(AppError::from)
}

pub fn cerrar_sesion(estado: &Estado) -> Result<(), AppError> {
    estado.db.limpiar_sesion()?;
    info!("Sesión cerrada");
    Ok(())
}

pub fn obtener_sesion_actual(estado: &Estado) -> Result<SesionActual, AppError> {
    Ok(sesion::sesion_actual(&estado.db)?)
}

/// Segundos de vida que le quedan al token guardado; None sin token
/// o si no trae `exp`
pub fn segundos_restantes(estado: &Estado) -> Result<Option<i64>, AppError> {
    Ok(estado.db.obtener_token()?.and_then(|t| token::tiempo_restante(&t)))
}

/// Revisión de arranque del token guardado
pub fn verificar_token(estado: &Estado) -> Result<EstadoToken, AppError> {
    Ok(sesion::verificar_token_almacenado(&estado.db)?)
}

/// Consulta al servidor si el usuario del token es administrador
pub async fn verificar_admin(estado: &Estado) -> Result<bool, AppError> {
    let token = token_requerido(&estado.db)?;
    Ok(estado.usuarios.es_admin(&token).await?)
}
