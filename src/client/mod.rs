//! HTTP client for the Dentissta backend
//!
//! Thin wrappers over `gloo_net` against the REST API mounted at `/api`.
//! Every call attaches the stored bearer token; a 401 clears the session
//! and sends the browser back to the login page.

mod types;

pub use types::*;

use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_storage::{LocalStorage, Storage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

const API_BASE: &str = "/api";
const TOKEN_KEY: &str = "token";

/// Errors surfaced to components. All variants carry a message suitable
/// for direct display.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("No se pudo conectar al servidor. Verificá que el backend esté corriendo")]
    SinConexion,
    #[error("No autorizado")]
    NoAutorizado,
    #[error("{0}")]
    Servidor(String),
    #[error("Respuesta inválida del servidor: {0}")]
    RespuestaInvalida(String),
}

pub fn token_guardado() -> Option<String> {
    LocalStorage::get(TOKEN_KEY).ok()
}

pub fn guardar_token(token: &str) {
    let _ = LocalStorage::set(TOKEN_KEY, token);
}

pub fn borrar_token() {
    LocalStorage::delete(TOKEN_KEY);
}

/// Resolves a stored image path against the API origin.
pub fn upload_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{API_BASE}{path}")
    }
}

fn url(endpoint: &str) -> String {
    format!("{API_BASE}{endpoint}")
}

fn con_auth(builder: RequestBuilder) -> RequestBuilder {
    match token_guardado() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

fn redirigir_a_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}

fn mensaje_de_error(cuerpo: &str, status: u16) -> String {
    // NestJS-style bodies: { "message": "..." } or { "message": ["..."] }
    if let Ok(valor) = serde_json::from_str::<serde_json::Value>(cuerpo) {
        let mensaje = match valor.get("message") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => items
                .first()
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            _ => None,
        };
        if let Some(m) = mensaje {
            return m;
        }
    }
    if cuerpo.trim().is_empty() {
        format!("Error {status}")
    } else {
        cuerpo.to_string()
    }
}

async fn procesar(respuesta: Response) -> Result<Response, ApiError> {
    if respuesta.status() == 401 {
        borrar_token();
        redirigir_a_login();
        return Err(ApiError::NoAutorizado);
    }
    if !respuesta.ok() {
        let status = respuesta.status();
        let cuerpo = respuesta.text().await.unwrap_or_default();
        return Err(ApiError::Servidor(mensaje_de_error(&cuerpo, status)));
    }
    Ok(respuesta)
}

async fn leer<T: DeserializeOwned>(respuesta: Response) -> Result<T, ApiError> {
    let respuesta = procesar(respuesta).await?;
    let texto = respuesta
        .text()
        .await
        .map_err(|e| ApiError::RespuestaInvalida(e.to_string()))?;
    // 204 and intentionally empty bodies decode as an empty object
    let texto = if texto.trim().is_empty() { "{}" } else { &texto };
    serde_json::from_str(texto).map_err(|e| {
        tracing::warn!(error = %e, "respuesta no decodificable");
        ApiError::RespuestaInvalida(e.to_string())
    })
}

async fn descartar(respuesta: Response) -> Result<(), ApiError> {
    procesar(respuesta).await.map(|_| ())
}

async fn get_json<T: DeserializeOwned>(endpoint: &str) -> Result<T, ApiError> {
    let respuesta = con_auth(Request::get(&url(endpoint)))
        .send()
        .await
        .map_err(|_| ApiError::SinConexion)?;
    leer(respuesta).await
}

async fn enviar_json<T: DeserializeOwned, B: Serialize>(
    builder: RequestBuilder,
    cuerpo: &B,
) -> Result<T, ApiError> {
    let respuesta = con_auth(builder)
        .json(cuerpo)
        .map_err(|e| ApiError::RespuestaInvalida(e.to_string()))?
        .send()
        .await
        .map_err(|_| ApiError::SinConexion)?;
    leer(respuesta).await
}

async fn enviar_sin_cuerpo<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let respuesta = con_auth(builder)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|_| ApiError::SinConexion)?;
    leer(respuesta).await
}

async fn eliminar(endpoint: &str) -> Result<(), ApiError> {
    let respuesta = con_auth(Request::delete(&url(endpoint)))
        .send()
        .await
        .map_err(|_| ApiError::SinConexion)?;
    descartar(respuesta).await
}

// ---- auth ----

pub async fn login(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    enviar_json(
        Request::post(&url("/auth/login")),
        &serde_json::json!({ "email": email, "password": password }),
    )
    .await
}

pub async fn me() -> Result<MeResponse, ApiError> {
    enviar_sin_cuerpo(Request::post(&url("/auth/me"))).await
}

// ---- dashboard ----

pub async fn dashboard() -> Result<DashboardData, ApiError> {
    get_json("/dashboard").await
}

// ---- pacientes ----

pub async fn pacientes_list(search: Option<&str>) -> Result<Vec<Paciente>, ApiError> {
    match search.filter(|s| !s.is_empty()) {
        Some(s) => {
            let respuesta = con_auth(Request::get(&url("/pacientes")).query([("search", s)]))
                .send()
                .await
                .map_err(|_| ApiError::SinConexion)?;
            leer(respuesta).await
        }
        None => get_json("/pacientes").await,
    }
}

pub async fn paciente_get(id: &str) -> Result<Paciente, ApiError> {
    get_json(&format!("/pacientes/{id}")).await
}

pub async fn paciente_create(datos: &serde_json::Value) -> Result<Paciente, ApiError> {
    enviar_json(Request::post(&url("/pacientes")), datos).await
}

pub async fn paciente_update(id: &str, datos: &serde_json::Value) -> Result<Paciente, ApiError> {
    enviar_json(Request::put(&url(&format!("/pacientes/{id}"))), datos).await
}

// ---- citas ----

pub async fn citas_list(
    start: Option<&str>,
    end: Option<&str>,
    paciente_id: Option<&str>,
) -> Result<Vec<Cita>, ApiError> {
    let params: Vec<(&str, &str)> = [
        start.map(|v| ("start", v)),
        end.map(|v| ("end", v)),
        paciente_id.map(|v| ("pacienteId", v)),
    ]
    .into_iter()
    .flatten()
    .collect();
    let respuesta = con_auth(Request::get(&url("/citas")).query(params))
        .send()
        .await
        .map_err(|_| ApiError::SinConexion)?;
    leer(respuesta).await
}

pub async fn cita_get(id: &str) -> Result<Cita, ApiError> {
    get_json(&format!("/citas/{id}")).await
}

pub async fn cita_create(datos: &serde_json::Value) -> Result<Cita, ApiError> {
    enviar_json(Request::post(&url("/citas")), datos).await
}

pub async fn cita_update(id: &str, datos: &serde_json::Value) -> Result<Cita, ApiError> {
    enviar_json(Request::put(&url(&format!("/citas/{id}"))), datos).await
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RecordatorioResponse {
    #[serde(default)]
    pub enviado: bool,
    #[serde(default)]
    pub mensaje: String,
}

pub async fn cita_enviar_recordatorio(id: &str) -> Result<RecordatorioResponse, ApiError> {
    enviar_json(
        Request::post(&url(&format!("/citas/{id}/enviar-recordatorio"))),
        &serde_json::json!({}),
    )
    .await
}

// ---- obras sociales ----

pub async fn obras_sociales_list() -> Result<Vec<ObraSocial>, ApiError> {
    get_json("/obras-sociales").await
}

pub async fn obra_social_create(nombre: &str, codigo: Option<&str>) -> Result<ObraSocial, ApiError> {
    enviar_json(
        Request::post(&url("/obras-sociales")),
        &serde_json::json!({ "nombre": nombre, "codigo": codigo }),
    )
    .await
}

pub async fn obra_social_update(
    id: &str,
    nombre: &str,
    codigo: Option<&str>,
) -> Result<ObraSocial, ApiError> {
    enviar_json(
        Request::put(&url(&format!("/obras-sociales/{id}"))),
        &serde_json::json!({ "nombre": nombre, "codigo": codigo }),
    )
    .await
}

pub async fn obra_social_delete(id: &str) -> Result<(), ApiError> {
    eliminar(&format!("/obras-sociales/{id}")).await
}

// ---- odontogramas ----

pub async fn odontogramas_por_paciente(paciente_id: &str) -> Result<Vec<Odontograma>, ApiError> {
    get_json(&format!("/odontograma/paciente/{paciente_id}")).await
}

pub async fn odontograma_create(
    paciente_id: &str,
    titulo: Option<&str>,
    cita_id: Option<&str>,
    numeros_dientes: Option<&[u8]>,
) -> Result<Odontograma, ApiError> {
    enviar_json(
        Request::post(&url(&format!("/odontograma/paciente/{paciente_id}"))),
        &serde_json::json!({
            "titulo": titulo,
            "citaId": cita_id,
            "numerosDientes": numeros_dientes,
        }),
    )
    .await
}

pub async fn odontograma_get(id: &str) -> Result<Odontograma, ApiError> {
    get_json(&format!("/odontograma/{id}")).await
}

pub async fn odontograma_update(id: &str, datos: &serde_json::Value) -> Result<Odontograma, ApiError> {
    enviar_json(Request::put(&url(&format!("/odontograma/{id}"))), datos).await
}

pub async fn odontograma_init_dientes(id: &str) -> Result<Vec<Diente>, ApiError> {
    enviar_sin_cuerpo(Request::post(&url(&format!("/odontograma/{id}/init")))).await
}

pub async fn odontograma_delete(id: &str) -> Result<(), ApiError> {
    eliminar(&format!("/odontograma/{id}")).await
}

pub async fn diente_create(
    odontograma_id: &str,
    numero_diente: u8,
    estado: &str,
) -> Result<Diente, ApiError> {
    enviar_json(
        Request::post(&url("/odontograma/diente")),
        &serde_json::json!({
            "odontogramaId": odontograma_id,
            "numeroDiente": numero_diente,
            "estado": estado,
        }),
    )
    .await
}

pub async fn diente_update(id: &str, datos: &serde_json::Value) -> Result<Diente, ApiError> {
    enviar_json(Request::put(&url(&format!("/odontograma/diente/{id}"))), datos).await
}

// ---- notas ----

pub async fn notas_por_paciente(paciente_id: &str) -> Result<Vec<Nota>, ApiError> {
    get_json(&format!("/notas/paciente/{paciente_id}")).await
}

pub async fn nota_create(datos: &serde_json::Value) -> Result<Nota, ApiError> {
    enviar_json(Request::post(&url("/notas")), datos).await
}

pub async fn nota_delete(id: &str) -> Result<(), ApiError> {
    eliminar(&format!("/notas/{id}")).await
}

// ---- imágenes ----

pub async fn imagenes_por_paciente(paciente_id: &str) -> Result<Vec<Imagen>, ApiError> {
    get_json(&format!("/imagenes/paciente/{paciente_id}")).await
}

/// Multipart upload; `tipo` defaults server-side compatible `FOTO_CLINICA`.
pub async fn imagen_upload(
    paciente_id: &str,
    archivo: &web_sys::File,
    descripcion: Option<&str>,
    tipo: Option<&str>,
    cita_id: Option<&str>,
) -> Result<Imagen, ApiError> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::SinConexion)?;
    let _ = form.append_with_blob("file", archivo);
    let _ = form.append_with_str("pacienteId", paciente_id);
    if let Some(d) = descripcion.filter(|d| !d.is_empty()) {
        let _ = form.append_with_str("descripcion", d);
    }
    let _ = form.append_with_str("tipo", tipo.unwrap_or("FOTO_CLINICA"));
    if let Some(c) = cita_id {
        let _ = form.append_with_str("citaId", c);
    }
    let respuesta = con_auth(Request::post(&url("/imagenes/upload")))
        .body(form)
        .map_err(|e| ApiError::RespuestaInvalida(e.to_string()))?
        .send()
        .await
        .map_err(|_| ApiError::SinConexion)?;
    leer(respuesta).await
}

pub async fn imagen_delete(id: &str) -> Result<(), ApiError> {
    eliminar(&format!("/imagenes/{id}")).await
}

// ---- historial ----

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HistorialResponse {
    pub paciente: PacienteRef,
    #[serde(default)]
    pub timeline: Vec<EventoHistorial>,
}

pub async fn historial_por_paciente(paciente_id: &str) -> Result<HistorialResponse, ApiError> {
    get_json(&format!("/historial/paciente/{paciente_id}")).await
}

// ---- prestaciones ----

#[derive(Debug, Clone, serde::Deserialize)]
pub struct PrestacionesCitaResponse {
    pub cita: Cita,
    #[serde(default)]
    pub registro: Option<RegistroPrestacion>,
}

pub async fn prestaciones_por_cita(cita_id: &str) -> Result<PrestacionesCitaResponse, ApiError> {
    get_json(&format!("/prestaciones/cita/{cita_id}")).await
}

pub async fn registro_prestacion_create(cita_id: &str) -> Result<RegistroPrestacion, ApiError> {
    enviar_sin_cuerpo(Request::post(&url(&format!("/prestaciones/cita/{cita_id}")))).await
}

pub async fn registro_prestacion_update(
    id: &str,
    datos: &serde_json::Value,
) -> Result<RegistroPrestacion, ApiError> {
    enviar_json(Request::put(&url(&format!("/prestaciones/registro/{id}"))), datos).await
}

pub async fn prestacion_item_add(
    registro_id: &str,
    datos: &serde_json::Value,
) -> Result<PrestacionItem, ApiError> {
    enviar_json(
        Request::post(&url(&format!("/prestaciones/registro/{registro_id}/items"))),
        datos,
    )
    .await
}

pub async fn prestacion_item_update(
    id: &str,
    datos: &serde_json::Value,
) -> Result<PrestacionItem, ApiError> {
    enviar_json(Request::put(&url(&format!("/prestaciones/items/{id}"))), datos).await
}

pub async fn prestacion_item_delete(id: &str) -> Result<(), ApiError> {
    eliminar(&format!("/prestaciones/items/{id}")).await
}

// ---- historia clínica ----

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoriaCitaResponse {
    pub cita: Cita,
    #[serde(default)]
    pub historia_clinica: Option<HistoriaClinica>,
}

pub async fn historia_por_cita(cita_id: &str) -> Result<HistoriaCitaResponse, ApiError> {
    get_json(&format!("/historia-clinica/cita/{cita_id}")).await
}

pub async fn historia_upsert_por_cita(
    cita_id: &str,
    datos: &serde_json::Value,
) -> Result<HistoriaClinica, ApiError> {
    enviar_json(
        Request::put(&url(&format!("/historia-clinica/cita/{cita_id}"))),
        &serde_json::json!({ "datos": datos }),
    )
    .await
}

pub async fn historias_por_paciente(paciente_id: &str) -> Result<Vec<HistoriaClinica>, ApiError> {
    get_json(&format!("/historia-clinica/paciente/{paciente_id}")).await
}

// ---- estados diente ----

pub async fn estados_diente_list() -> Result<Vec<EstadoDiente>, ApiError> {
    get_json("/estados-diente").await
}

pub async fn estado_diente_create(datos: &serde_json::Value) -> Result<EstadoDiente, ApiError> {
    enviar_json(Request::post(&url("/estados-diente")), datos).await
}

pub async fn estado_diente_update(
    id: &str,
    datos: &serde_json::Value,
) -> Result<EstadoDiente, ApiError> {
    enviar_json(Request::put(&url(&format!("/estados-diente/{id}"))), datos).await
}

pub async fn estado_diente_delete(id: &str) -> Result<(), ApiError> {
    eliminar(&format!("/estados-diente/{id}")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mensaje_de_error_string() {
        assert_eq!(
            mensaje_de_error(r#"{"message":"DNI duplicado"}"#, 400),
            "DNI duplicado"
        );
    }

    #[test]
    fn mensaje_de_error_lista() {
        assert_eq!(
            mensaje_de_error(r#"{"message":["nombre requerido","dni requerido"]}"#, 400),
            "nombre requerido"
        );
    }

    #[test]
    fn mensaje_de_error_cuerpo_vacio() {
        assert_eq!(mensaje_de_error("", 500), "Error 500");
    }

    #[test]
    fn mensaje_de_error_cuerpo_no_json() {
        assert_eq!(mensaje_de_error("Bad Gateway", 502), "Bad Gateway");
    }

    #[test]
    fn cita_expone_nombre_y_telefono_del_paciente() {
        let cita: Cita = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "fecha": "2026-08-29",
            "horaInicio": "09:00",
            "horaFin": "09:30",
            "estado": "PENDIENTE",
            "paciente": { "id": "p1", "nombre": "Ana", "apellido": "Suárez", "telefono": "1155550000" }
        }))
        .unwrap();
        assert_eq!(cita.paciente.nombre_completo(), "Ana Suárez");
        assert_eq!(cita.paciente.telefono.as_deref(), Some("1155550000"));
    }

    #[test]
    fn prestacion_item_decodifica_el_esquema_del_api() {
        let item: PrestacionItem = serde_json::from_value(serde_json::json!({
            "id": "i1",
            "numeroDiente": 36,
            "cara": "OCLUSAL",
            "codigo": "OBT01",
            "fechaRealizacion": "2026-08-29T00:00:00.000Z",
            "cantidad": 2,
            "conformidadPaciente": true
        }))
        .unwrap();
        assert_eq!(item.numero_diente, 36);
        assert_eq!(
            item.fecha_realizacion.as_deref(),
            Some("2026-08-29T00:00:00.000Z")
        );
        assert!(item.conformidad_paciente);
    }

    #[test]
    fn upload_url_relativa_y_absoluta() {
        assert_eq!(upload_url("/uploads/foto.jpg"), "/api/uploads/foto.jpg");
        assert_eq!(
            upload_url("https://cdn.example.com/foto.jpg"),
            "https://cdn.example.com/foto.jpg"
        );
    }
}
