/// Extrae el mensaje de error que manda el backend en el cuerpo de una
/// respuesta no exitosa (`error` y/o `details`). Si no hay nada usable
/// retorna el texto por defecto de la operación.
pub fn mensaje_de_error(cuerpo: &str, por_defecto: &str) -> String {
    let texto = |v: &serde_json::Value, campo: &str| -> Option<String> {
        v.get(campo)
            .and_then(|x| x.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    match serde_json::from_str::<serde_json::Value>(cuerpo) {
        Ok(v) => match (texto(&v, "error"), texto(&v, "details")) {
            (Some(error), Some(details)) => format!("{}: {}", error, details),
            (Some(error), None) => error,
            (None, Some(details)) => details,
            (None, None) => por_defecto.to_string(),
        },
        Err(_) => por_defecto.to_string(),
    }
}

/// Une una URL base con una ruta sin duplicar barras
pub fn unir_url(base: &str, ruta: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), ruta.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mensaje_error_campo_error() {
        let m = mensaje_de_error(r#"{"error":"Credenciales incorrectas"}"#, "x");
        assert_eq!(m, "Credenciales incorrectas");
    }

    #[test]
    fn test_mensaje_error_con_detalles() {
        let m = mensaje_de_error(
            r#"{"error":"Failed to fetch activitys","details":"solr caido"}"#,
            "x",
        );
        assert_eq!(m, "Failed to fetch activitys: solr caido");
        let solo = mensaje_de_error(r#"{"details":"solr caido"}"#, "x");
        assert_eq!(solo, "solr caido");
    }

    #[test]
    fn test_mensaje_error_por_defecto() {
        assert_eq!(mensaje_de_error("", "Error al crear"), "Error al crear");
        assert_eq!(mensaje_de_error("<html>502</html>", "Fallo"), "Fallo");
        assert_eq!(mensaje_de_error(r#"{"error":"  "}"#, "Fallo"), "Fallo");
        assert_eq!(mensaje_de_error(r#"{"error":5}"#, "Fallo"), "Fallo");
    }

    #[test]
    fn test_unir_url() {
        assert_eq!(unir_url("http://h:1/", "/activities"), "http://h:1/activities");
        assert_eq!(unir_url("http://h:1", "users/3"), "http://h:1/users/3");
    }
}
