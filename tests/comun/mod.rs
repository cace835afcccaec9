#![allow(dead_code)]

use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::path::Path;

use gimnasio_cliente::commands::Estado;
use gimnasio_cliente::config::Config;

/// Sirve el router en un puerto libre y devuelve la URL base
pub async fn levantar(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Los tres servicios apuntan al mismo servidor de prueba
pub fn estado(base: &str, dir: &Path) -> Estado {
    Estado::new(Config::con_base(base, dir.join("sesion.db"))).unwrap()
}

pub fn token(payload: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let cuerpo = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{}.{}.firma", header, cuerpo)
}

/// Token vigente hasta 2096
pub fn token_vigente(id_usuario: i64, is_admin: bool) -> String {
    token(serde_json::json!({
        "id_usuario": id_usuario,
        "username": "lucia",
        "is_admin": is_admin,
        "exp": 4_000_000_000i64
    }))
}

pub fn actividad_json(id: &str, titulo: &str, dia: &str, cupo: i64) -> serde_json::Value {
    serde_json::json!({
        "id_actividad": id,
        "titulo": titulo,
        "descripcion": format!("Clase de {}", titulo),
        "instructor": "Ana",
        "dia": dia,
        "hora_inicio": "08:00",
        "hora_fin": "09:00",
        "cupo": cupo,
        "lugares_disponibles": cupo,
        "foto_url": ""
    })
}
