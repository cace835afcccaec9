pub mod schema;

use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use crate::error::DbError;

/// Única clave que el cliente escribe
pub const CLAVE_TOKEN: &str = "access_token";

/// Espejos de sesión de versiones anteriores. Nunca se leen; se borran al
/// cerrar sesión para que no quede un estado paralelo al token.
const CLAVES_LEGADAS: [&str; 4] = ["idUsuario", "isAdmin", "isLoggedIn", "username"];

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn new(db_path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        info!("Almacenamiento local en {}", db_path.display());
        Self::con_conexion(conn)
    }

    pub fn en_memoria() -> Result<Self, DbError> {
        Self::con_conexion(Connection::open_in_memory()?)
    }

    fn con_conexion(conn: Connection) -> Result<Self, DbError> {
        schema::create_tables(&conn)?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Ruta por defecto de la base local
    pub fn ruta_por_defecto() -> PathBuf {
        let mut path = dirs_next().unwrap_or_else(|| PathBuf::from("."));
        path.push("sesion.db");
        path
    }

    pub fn obtener(&self, clave: &str) -> Result<Option<String>, DbError> {
        let conn = self.conn.lock().map_err(|e| DbError::Bloqueo(e.to_string()))?;
        let valor = conn
            .query_row(
                "SELECT valor FROM almacenamiento WHERE clave = ?1",
                rusqlite::params![clave],
                |row| row.get(0),
            )
            .optional()?;
        Ok(valor)
    }

    pub fn guardar(&self, clave: &str, valor: &str) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|e| DbError::Bloqueo(e.to_string()))?;
        conn.execute(
            "INSERT OR REPLACE INTO almacenamiento (clave, valor, updated_at)
             VALUES (?1, ?2, datetime('now','localtime'))",
            rusqlite::params![clave, valor],
        )?;
        Ok(())
    }

    pub fn eliminar(&self, clave: &str) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|e| DbError::Bloqueo(e.to_string()))?;
        conn.execute(
            "DELETE FROM almacenamiento WHERE clave = ?1",
            rusqlite::params![clave],
        )?;
        Ok(())
    }

    pub fn obtener_token(&self) -> Result<Option<String>, DbError> {
        Ok(self.obtener(CLAVE_TOKEN)?.filter(|t| !t.is_empty()))
    }

    pub fn guardar_token(&self, token: &str) -> Result<(), DbError> {
        self.guardar(CLAVE_TOKEN, token)
    }

    /// Borra el token y cualquier espejo legado de la sesión
    pub fn limpiar_sesion(&self) -> Result<(), DbError> {
        self.eliminar(CLAVE_TOKEN)?;
        for clave in CLAVES_LEGADAS {
            self.eliminar(clave)?;
        }
        Ok(())
    }
}

/// Retorna el directorio de datos de la aplicación
fn dirs_next() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("LOCALAPPDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("Gimnasio"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".gimnasio"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardar_y_leer_token() {
        let db = Database::en_memoria().unwrap();
        assert_eq!(db.obtener_token().unwrap(), None);
        db.guardar_token("abc.def.ghi").unwrap();
        assert_eq!(db.obtener_token().unwrap().as_deref(), Some("abc.def.ghi"));
        db.guardar_token("otro.token.x").unwrap();
        assert_eq!(db.obtener_token().unwrap().as_deref(), Some("otro.token.x"));
    }

    #[test]
    fn test_token_vacio_es_ausente() {
        let db = Database::en_memoria().unwrap();
        db.guardar_token("").unwrap();
        assert_eq!(db.obtener_token().unwrap(), None);
    }

    #[test]
    fn test_limpiar_sesion_borra_espejos() {
        let db = Database::en_memoria().unwrap();
        db.guardar_token("a.b.c").unwrap();
        db.guardar("isAdmin", "true").unwrap();
        db.guardar("isLoggedIn", "true").unwrap();
        db.limpiar_sesion().unwrap();
        assert_eq!(db.obtener_token().unwrap(), None);
        assert_eq!(db.obtener("isAdmin").unwrap(), None);
        assert_eq!(db.obtener("isLoggedIn").unwrap(), None);
    }

    #[test]
    fn test_conexion_envenenada() {
        let db = std::sync::Arc::new(Database::en_memoria().unwrap());
        let otra = db.clone();
        let _ = std::thread::spawn(move || {
            let _conn = otra.conn.lock().unwrap();
            panic!("pánico con la conexión tomada");
        })
        .join();

        assert!(matches!(db.obtener_token(), Err(DbError::Bloqueo(_))));
        assert!(matches!(db.guardar_token("a.b.c"), Err(DbError::Bloqueo(_))));
    }

    #[test]
    fn test_base_en_disco() {
        let dir = tempfile::tempdir().unwrap();
        let ruta = dir.path().join("sub").join("sesion.db");
        {
            let db = Database::new(&ruta).unwrap();
            db.guardar_token("x.y.z").unwrap();
        }
        let db = Database::new(&ruta).unwrap();
        assert_eq!(db.obtener_token().unwrap().as_deref(), Some("x.y.z"));
    }
}
