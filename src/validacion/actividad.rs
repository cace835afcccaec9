use reqwest::Url;

use super::ErroresFormulario;
use crate::constantes::DIAS_SEMANA;
use crate::models::{ActividadPayload, BorradorActividad};

const ERROR_USUARIOS_INSCRITOS: &str =
    "Los usuarios inscritos deben ser ids numéricos separados por coma";

pub fn validar_actividad(b: &BorradorActividad) -> ErroresFormulario {
    let mut errores = ErroresFormulario::new();
    let mut error = |campo: &str, msg: &str| {
        errores.insert(campo.to_string(), msg.to_string());
    };

    let titulo = b.titulo.trim();
    if titulo.is_empty() {
        error("titulo", "El título es requerido");
    } else if titulo.chars().count() < 3 {
        error("titulo", "El título debe tener al menos 3 caracteres");
    }

    let descripcion = b.descripcion.trim();
    if descripcion.is_empty() {
        error("descripcion", "La descripción es requerida");
    } else if descripcion.chars().count() < 10 {
        error("descripcion", "La descripción debe tener al menos 10 caracteres");
    }

    if b.instructor.trim().is_empty() {
        error("instructor", "El instructor es requerido");
    }

    let inicio = b.hora_inicio.trim();
    let fin = b.hora_fin.trim();
    if inicio.is_empty() {
        error("hora_inicio", "La hora de inicio es requerida");
    }
    if fin.is_empty() {
        error("hora_fin", "La hora de fin es requerida");
    }
    // HH:MM ordena bien como texto
    if !inicio.is_empty() && !fin.is_empty() && fin <= inicio {
        error("hora_fin", "La hora de fin debe ser posterior a la hora de inicio");
    }

    let dia = b.dia.trim();
    if dia.is_empty() {
        error("dia", "Debe seleccionar un día");
    } else if dia_normalizado(dia).is_none() {
        error("dia", "El día seleccionado no es válido");
    }

    let cupo = b.cupo.trim();
    if cupo.is_empty() {
        error("cupo", "El cupo es requerido");
    } else if !matches!(cupo.parse::<i64>(), Ok(n) if n >= 1) {
        error("cupo", "El cupo debe ser un número mayor a 0");
    }

    let foto = b.foto_url.trim();
    if !foto.is_empty() && Url::parse(foto).is_err() {
        error("foto_url", "Debe proporcionar una URL válida");
    }

    if usuarios_inscritos(&b.usuarios_inscritos).is_err() {
        error("usuarios_inscritos", ERROR_USUARIOS_INSCRITOS);
    }

    errores
}

/// Valida el borrador y lo convierte en el cuerpo que espera el servicio
pub fn validar_y_convertir_actividad(
    b: &BorradorActividad,
) -> Result<ActividadPayload, ErroresFormulario> {
    let errores = validar_actividad(b);
    if !errores.is_empty() {
        return Err(errores);
    }

    let error_en = |campo: &str, msg: &str| {
        let mut e = ErroresFormulario::new();
        e.insert(campo.to_string(), msg.to_string());
        e
    };
    let cupo = b
        .cupo
        .trim()
        .parse::<i64>()
        .map_err(|_| error_en("cupo", "El cupo debe ser un número mayor a 0"))?;
    let inscritos = usuarios_inscritos(&b.usuarios_inscritos)
        .map_err(|_| error_en("usuarios_inscritos", ERROR_USUARIOS_INSCRITOS))?;

    Ok(ActividadPayload {
        titulo: b.titulo.trim().to_string(),
        descripcion: b.descripcion.trim().to_string(),
        instructor: b.instructor.trim().to_string(),
        dia: dia_normalizado(&b.dia).unwrap_or(b.dia.trim()).to_string(),
        hora_inicio: b.hora_inicio.trim().to_string(),
        hora_fin: b.hora_fin.trim().to_string(),
        cupo,
        foto_url: b.foto_url.trim().to_string(),
        usuarios_inscritos: inscritos,
    })
}

/// "3, 8,12" -> [3, 8, 12]. Texto vacío es None: la lista no se envía.
fn usuarios_inscritos(texto: &str) -> Result<Option<Vec<i64>>, std::num::ParseIntError> {
    if texto.trim().is_empty() {
        return Ok(None);
    }
    texto
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::parse::<i64>)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Devuelve la etiqueta canónica del día, sin distinguir mayúsculas
fn dia_normalizado(dia: &str) -> Option<&'static str> {
    let dia = dia.trim().to_lowercase();
    DIAS_SEMANA.iter().copied().find(|d| d.to_lowercase() == dia)
}
