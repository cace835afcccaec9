use tracing::error;

use super::{token_requerido, Estado};
use crate::error::AppError;
use crate::listado::{procesar, FiltroUsuarios, Ordenamiento, Pagina, Paginacion};
use crate::models::{BorradorUsuario, NuevoUsuario, Usuario, UsuarioActualizado};
use crate::validacion::{validar_usuario, ModoFormulario};

pub async fn listar_usuarios(
    estado: &Estado,
    filtro: &FiltroUsuarios,
    orden: &Ordenamiento,
    paginacion: &Paginacion,
) -> Result<Pagina<Usuario>, AppError> {
    let token = token_requerido(&estado.db)?;
    let usuarios = estado.usuarios.listar(&token).await?;
    Ok(procesar(&usuarios, filtro, orden, paginacion))
}

pub async fn obtener_usuario(estado: &Estado, id: i64) -> Result<Usuario, AppError> {
    let id = id_requerido(id, "obtener")?;
    let token = token_requerido(&estado.db)?;
    Ok(estado.usuarios.obtener(&token, id).await?)
}

pub async fn crear_usuario(estado: &Estado, borrador: &BorradorUsuario) -> Result<(), AppError> {
    let errores = validar_usuario(borrador, ModoFormulario::Crear);
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }
    let token = token_requerido(&estado.db)?;
    Ok(estado.usuarios.crear(&token, &NuevoUsuario::from(borrador)).await?)
}

/// La contraseña solo viaja si se escribió una nueva
pub async fn actualizar_usuario(
    estado: &Estado,
    id: i64,
    borrador: &BorradorUsuario,
) -> Result<(), AppError> {
    let id = id_requerido(id, "actualizar")?;
    let errores = validar_usuario(borrador, ModoFormulario::Editar);
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }
    let token = token_requerido(&estado.db)?;
    Ok(estado
        .usuarios
        .actualizar(&token, id, &UsuarioActualizado::from(borrador))
        .await?)
}

pub async fn eliminar_usuario(estado: &Estado, id: i64) -> Result<(), AppError> {
    let id = id_requerido(id, "eliminar")?;
    let token = token_requerido(&estado.db)?;
    Ok(estado.usuarios.eliminar(&token, id).await?)
}

fn id_requerido(id: i64, operacion: &str) -> Result<i64, AppError> {
    if id <= 0 {
        error!("Se intentó {} un usuario con id inválido: {}", operacion, id);
        return Err(AppError::Invariante("ID de usuario inválido".to_string()));
    }
    Ok(id)
}
