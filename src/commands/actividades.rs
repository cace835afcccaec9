use tracing::error;

use super::{token_requerido, usuario_requerido, Estado};
use crate::error::AppError;
use crate::listado::{procesar, FiltroActividades, Ordenamiento, Pagina, Paginacion};
use crate::models::{Actividad, BorradorActividad, Estadisticas, Inscripciones};
use crate::validacion::validar_y_convertir_actividad;

/// Trae todas las actividades y aplica filtro, orden y página en el cliente
pub async fn listar_actividades(
    estado: &Estado,
    mut filtro: FiltroActividades,
    orden: &Ordenamiento,
    paginacion: &Paginacion,
) -> Result<Pagina<Actividad>, AppError> {
    let actividades = estado.actividades.listar().await?;
    if filtro.solo_inscripto {
        filtro.inscripciones = inscripciones_usuario(estado).await?;
    }
    Ok(procesar(&actividades, &filtro, orden, paginacion))
}

pub async fn obtener_actividad(estado: &Estado, id: &str) -> Result<Actividad, AppError> {
    let id = id_requerido(id, "obtener")?;
    Ok(estado.actividades.obtener(id).await?)
}

pub async fn crear_actividad(
    estado: &Estado,
    borrador: &BorradorActividad,
) -> Result<Actividad, AppError> {
    let datos = validar_y_convertir_actividad(borrador).map_err(AppError::Validacion)?;
    let token = token_requerido(&estado.db)?;
    Ok(estado.actividades.crear(&token, &datos).await?)
}

pub async fn actualizar_actividad(
    estado: &Estado,
    id: &str,
    borrador: &BorradorActividad,
) -> Result<Actividad, AppError> {
    let id = id_requerido(id, "actualizar")?;
    let datos = validar_y_convertir_actividad(borrador).map_err(AppError::Validacion)?;
    let token = token_requerido(&estado.db)?;
    Ok(estado.actividades.actualizar(&token, id, &datos).await?)
}

pub async fn eliminar_actividad(estado: &Estado, id: &str) -> Result<(), AppError> {
    let id = id_requerido(id, "eliminar")?;
    let token = token_requerido(&estado.db)?;
    Ok(estado.actividades.eliminar(&token, id).await?)
}

/// Inscribe al usuario de la sesión y devuelve sus inscripciones actualizadas
pub async fn inscribir(estado: &Estado, id: &str) -> Result<Inscripciones, AppError> {
    let id = id_requerido(id, "inscribir")?;
    let (token, usuario_id) = usuario_requerido(&estado.db)?;
    estado.actividades.inscribir(&token, usuario_id, id).await?;
    Ok(estado.actividades.inscripciones(&token, usuario_id).await?)
}

pub async fn desinscribir(estado: &Estado, id: &str) -> Result<Inscripciones, AppError> {
    let id = id_requerido(id, "desinscribir")?;
    let (token, usuario_id) = usuario_requerido(&estado.db)?;
    estado.actividades.desinscribir(&token, usuario_id, id).await?;
    Ok(estado.actividades.inscripciones(&token, usuario_id).await?)
}

pub async fn inscripciones_usuario(estado: &Estado) -> Result<Inscripciones, AppError> {
    let (token, usuario_id) = usuario_requerido(&estado.db)?;
    Ok(estado.actividades.inscripciones(&token, usuario_id).await?)
}

pub async fn mis_actividades(estado: &Estado) -> Result<Vec<Actividad>, AppError> {
    let (token, usuario_id) = usuario_requerido(&estado.db)?;
    Ok(estado.actividades.actividades_inscriptas(&token, usuario_id).await?)
}

pub async fn estadisticas(estado: &Estado) -> Result<Estadisticas, AppError> {
    let token = token_requerido(&estado.db)?;
    Ok(estado.actividades.estadisticas(&token).await?)
}

fn id_requerido<'a>(id: &'a str, operacion: &str) -> Result<&'a str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        error!("Se intentó {} una actividad sin id", operacion);
        return Err(AppError::Invariante("ID de actividad inválido".to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_requerido() {
        assert_eq!(id_requerido(" a1 ", "eliminar").unwrap(), "a1");
        assert!(matches!(id_requerido("  ", "eliminar"), Err(AppError::Invariante(_))));
    }
}
