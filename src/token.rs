use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};

use crate::models::Claims;

/// Acepta el segmento con o sin relleno `=`
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodifica el payload (segmento del medio) de un token `header.payload.firma`.
/// No verifica la firma: la autoridad es el servidor. Retorna None ante
/// cualquier entrada malformada.
pub fn decodificar(token: &str) -> Option<Claims> {
    let partes: Vec<&str> = token.split('.').collect();
    if partes.len() != 3 {
        return None;
    }

    // base64url -> base64 estándar
    let segmento: String = partes[1]
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            otro => otro,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE.decode(segmento.as_bytes()).ok()?;
    serde_json::from_slice::<Claims>(&bytes).ok()
}

/// Un token sin `exp` o imposible de decodificar se considera expirado.
pub fn esta_expirado_en(token: &str, ahora: DateTime<Utc>) -> bool {
    match decodificar(token).and_then(|c| c.exp) {
        Some(exp) => ahora.timestamp_millis() > exp.saturating_mul(1000),
        None => true,
    }
}

pub fn esta_expirado(token: &str) -> bool {
    esta_expirado_en(token, Utc::now())
}

/// Segundos que le quedan al token (0 si ya expiró)
pub fn tiempo_restante_en(token: &str, ahora: DateTime<Utc>) -> Option<i64> {
    let exp = decodificar(token)?.exp?;
    let restante_ms = exp.saturating_mul(1000).saturating_sub(ahora.timestamp_millis());
    Some((restante_ms / 1000).max(0))
}

pub fn tiempo_restante(token: &str) -> Option<i64> {
    tiempo_restante_en(token, Utc::now())
}
