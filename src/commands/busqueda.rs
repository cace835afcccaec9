use super::Estado;
use crate::constantes::ITEMS_POR_PAGINA_ACTIVIDADES;
use crate::error::AppError;
use crate::models::FiltrosBusqueda;
use crate::servicios::ResultadoBusqueda;

/// Búsqueda paginada en el servidor. Sin página ni tamaño se pide la
/// primera página con el tamaño de la grilla pública.
pub async fn buscar_actividades(
    estado: &Estado,
    mut filtros: FiltrosBusqueda,
) -> Result<ResultadoBusqueda, AppError> {
    filtros.page = Some(filtros.page.unwrap_or(1).max(1));
    filtros.count = Some(filtros.count.unwrap_or(ITEMS_POR_PAGINA_ACTIVIDADES as u32).max(1));
    Ok(estado.buscador.buscar(&filtros).await?)
}
