mod comun;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gimnasio_cliente::cli::Comando;
use gimnasio_cliente::commands::sesion;
use gimnasio_cliente::error::{ApiError, AppError};
use gimnasio_cliente::models::{BorradorUsuario, EstadoToken};

use comun::{estado, levantar, token, token_vigente};

type Cuerpos = Arc<std::sync::Mutex<Vec<Value>>>;

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "lucia" && body["password"] == "Abc123" {
        (
            StatusCode::CREATED,
            Json(json!({
                "access_token": token_vigente(5, true),
                "token_type": "bearer",
                "expires_in": 1800
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Credenciales incorrectas"})),
        )
    }
}

#[tokio::test]
async fn test_login_guarda_token_y_deriva_sesion() {
    let base = levantar(Router::new().route("/login", post(login))).await;
    let dir = tempfile::tempdir().unwrap();
    let e = estado(&base, dir.path());

    let s = sesion::iniciar_sesion(&e, "lucia", "Abc123").await.unwrap();
    assert!(s.logueado);
    assert!(s.es_admin);
    assert_eq!(s.usuario_id, Some(5));
    assert_eq!(e.db.obtener_token().unwrap(), Some(token_vigente(5, true)));

    // Otra instancia sobre el mismo archivo ve la misma sesión
    drop(e);
    let e = estado(&base, dir.path());
    assert_eq!(sesion::obtener_sesion_actual(&e).unwrap(), s);
}

#[tokio::test]
async fn test_login_fallido_usa_mensaje_del_servidor() {
    let base = levantar(Router::new().route("/login", post(login))).await;
    let dir = tempfile::tempdir().unwrap();
    let e = estado(&base, dir.path());

    let err = sesion::iniciar_sesion(&e, "lucia", "otra").await.unwrap_err();
    match err {
        AppError::Api(ApiError::Http { status, mensaje }) => {
            assert_eq!(status, 401);
            assert_eq!(mensaje, "Credenciales incorrectas");
        }
        otro => panic!("error inesperado: {:?}", otro),
    }
    assert_eq!(e.db.obtener_token().unwrap(), None);
}

#[tokio::test]
async fn test_login_vacio_no_llama_al_servidor() {
    let llamadas = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/login",
            post(|State(n): State<Arc<AtomicUsize>>| async move {
                n.fetch_add(1, Ordering::SeqCst);
                StatusCode::UNAUTHORIZED
            }),
        )
        .with_state(llamadas.clone());
    let base = levantar(app).await;
    let dir = tempfile::tempdir().unwrap();
    let e = estado(&base, dir.path());

    let err = sesion::iniciar_sesion(&e, " ", "").await.unwrap_err();
    assert!(matches!(err, AppError::Validacion(ref m) if m.len() == 2));
    assert_eq!(llamadas.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_registro_valida_antes_de_enviar() {
    let cuerpos = Cuerpos::default();
    let app = Router::new()
        .route(
            "/register",
            post(
                |State(c): State<Cuerpos>, Json(body): Json<Value>| async move {
                    c.lock().unwrap().push(body);
                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "access_token": token_vigente(9, false),
                            "token_type": "bearer",
                            "expires_in": 1800
                        })),
                    )
                },
            ),
        )
        .with_state(cuerpos.clone());
    let base = levantar(app).await;
    let dir = tempfile::tempdir().unwrap();
    let e = estado(&base, dir.path());

    let mut borrador = BorradorUsuario {
        nombre: "Lucía".to_string(),
        apellido: "Pérez".to_string(),
        email: "lucia@gimnasio.com".to_string(),
        username: "lucia".to_string(),
        password: "abc".to_string(),
        confirm_password: None,
        is_admin: true,
    };
    let err = sesion::registrar(&e, &borrador).await.unwrap_err();
    assert!(matches!(err, AppError::Validacion(ref m) if m.contains_key("password")));
    assert!(cuerpos.lock().unwrap().is_empty());

    borrador.password = "Abc123".to_string();
    let s = sesion::registrar(&e, &borrador).await.unwrap();
    assert_eq!(s.usuario_id, Some(9));

    let enviados = cuerpos.lock().unwrap();
    assert_eq!(enviados.len(), 1);
    assert_eq!(enviados[0]["username"], "lucia");
    assert_eq!(enviados[0]["is_admin"], false);
}

#[tokio::test]
async fn test_logout_borra_token_y_espejos() {
    let dir = tempfile::tempdir().unwrap();
    let e = estado("http://127.0.0.1:9", dir.path());
    e.db.guardar_token(&token_vigente(1, true)).unwrap();
    e.db.guardar("isAdmin", "true").unwrap();

    sesion::cerrar_sesion(&e).unwrap();
    assert_eq!(e.db.obtener_token().unwrap(), None);
    assert_eq!(e.db.obtener("isAdmin").unwrap(), None);
    assert!(!sesion::obtener_sesion_actual(&e).unwrap().logueado);
}

#[tokio::test]
async fn test_token_vencido_al_arrancar() {
    let dir = tempfile::tempdir().unwrap();
    let e = estado("http://127.0.0.1:9", dir.path());
    let vencido = token(json!({"id_usuario": 1, "is_admin": true, "exp": 1_000}));

    e.db.guardar_token(&vencido).unwrap();
    let err = gimnasio_cliente::ejecutar_con_estado(&e, Comando::MisActividades)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SesionExpirada));
    assert_eq!(e.db.obtener_token().unwrap(), None);

    e.db.guardar_token(&vencido).unwrap();
    assert_eq!(sesion::verificar_token(&e).unwrap(), EstadoToken::Expirado);
    assert_eq!(sesion::verificar_token(&e).unwrap(), EstadoToken::SinToken);
}

#[tokio::test]
async fn test_sesion_sin_token_por_cli() {
    let dir = tempfile::tempdir().unwrap();
    let e = estado("http://127.0.0.1:9", dir.path());
    let salida = gimnasio_cliente::ejecutar_con_estado(&e, Comando::Sesion { verificar: false })
        .await
        .unwrap();
    assert_eq!(salida["logueado"], false);
    assert_eq!(salida["username"], "Usuario");
}

#[tokio::test]
async fn test_sesion_informa_segundos_restantes() {
    let dir = tempfile::tempdir().unwrap();
    let e = estado("http://127.0.0.1:9", dir.path());
    let salida = gimnasio_cliente::ejecutar_con_estado(&e, Comando::Sesion { verificar: false })
        .await
        .unwrap();
    assert!(salida["segundos_restantes"].is_null());

    e.db.guardar_token(&token_vigente(5, false)).unwrap();
    let salida = gimnasio_cliente::ejecutar_con_estado(&e, Comando::Sesion { verificar: false })
        .await
        .unwrap();
    assert_eq!(salida["logueado"], true);
    assert!(salida["segundos_restantes"].as_i64().unwrap() > 0);
    assert!(sesion::segundos_restantes(&e).unwrap().unwrap() > 0);
}
