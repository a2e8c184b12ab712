use crate::errors::{ApiError, REQUEST_FALLBACK};
use crate::models::{
    Cliente, ClientesResponse, CreatedResponse, NuevaObra, NuevoCliente, NuevoProducto,
    NuevoRegistro, Obra, ObrasResponse, Producto, ProductosResponse, Registro, RegistroDetalle,
    RegistroFiltro, RegistrosResponse, ReportesResponse, SuccessResponse, UserProfile,
};
use crate::session::Session;
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://fintrack-backend.onrender.com";

pub fn resolve_base_url() -> String {
    env::var("FINTRACK_API_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(session: Session) -> Self {
        Self::with_base_url(resolve_base_url(), session)
    }

    pub fn with_base_url(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    fn username(&self) -> Result<&str, ApiError> {
        self.session.username().ok_or(ApiError::NotAuthenticated)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_user(&self) -> Result<UserProfile, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .get(self.url("/api/user"))
            .query(&[("username", username)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_clientes(&self) -> Result<Vec<Cliente>, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .get(self.url("/api/clientes"))
            .query(&[("username", username)])
            .send()
            .await?;
        let body: ClientesResponse = decode(response).await?;
        Ok(body.clientes)
    }

    pub async fn create_cliente(&self, cliente: &NuevoCliente) -> Result<CreatedResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .post(self.url("/api/clientes"))
            .multipart(cliente_form(username, cliente))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_cliente(
        &self,
        id: i64,
        cliente: &NuevoCliente,
    ) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .put(self.url(&format!("/api/clientes/{id}")))
            .multipart(cliente_form(username, cliente))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_cliente(&self, id: i64) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .delete(self.url(&format!("/api/clientes/{id}")))
            .query(&[("username", username)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_obras(&self) -> Result<Vec<Obra>, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .get(self.url("/api/obras"))
            .query(&[("username", username)])
            .send()
            .await?;
        let body: ObrasResponse = decode(response).await?;
        Ok(body.obras)
    }

    pub async fn create_obra(&self, obra: &NuevaObra) -> Result<CreatedResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .post(self.url("/api/obras"))
            .multipart(obra_form(username, obra))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_obra(&self, id: i64, obra: &NuevaObra) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .put(self.url(&format!("/api/obras/{id}")))
            .multipart(obra_form(username, obra))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_obra(&self, id: i64) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .delete(self.url(&format!("/api/obras/{id}")))
            .query(&[("username", username)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_productos(&self) -> Result<Vec<Producto>, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .get(self.url("/api/productos"))
            .query(&[("username", username)])
            .send()
            .await?;
        let body: ProductosResponse = decode(response).await?;
        Ok(body.productos)
    }

    pub async fn create_producto(
        &self,
        producto: &NuevoProducto,
    ) -> Result<CreatedResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .post(self.url("/api/productos"))
            .multipart(producto_form(username, producto))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_producto(
        &self,
        id: i64,
        producto: &NuevoProducto,
    ) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .put(self.url(&format!("/api/productos/{id}")))
            .multipart(producto_form(username, producto))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_producto(&self, id: i64) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .delete(self.url(&format!("/api/productos/{id}")))
            .query(&[("username", username)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_registros(&self, filtro: &RegistroFiltro) -> Result<Vec<Registro>, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .get(self.url("/api/registros"))
            .query(&filtro_query(username, filtro))
            .send()
            .await?;
        let body: RegistrosResponse = decode(response).await?;
        Ok(body.registros)
    }

    pub async fn create_registro(
        &self,
        registro: &NuevoRegistro,
    ) -> Result<CreatedResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .post(self.url("/api/registros"))
            .json(&registro_payload(username, registro))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_registro(
        &self,
        id: i64,
        registro: &NuevoRegistro,
    ) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .put(self.url(&format!("/api/registros/{id}")))
            .json(&registro_payload(username, registro))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_registro(&self, id: i64) -> Result<SuccessResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .delete(self.url(&format!("/api/registros/{id}")))
            .query(&[("username", username)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_reportes(&self, filtro: &RegistroFiltro) -> Result<ReportesResponse, ApiError> {
        let username = self.username()?;
        let response = self
            .http
            .get(self.url("/api/reportes"))
            .query(&filtro_query(username, filtro))
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::request(extract_message(&body)))
}

// Error bodies carry {detail: {message}} or a top-level {message}.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.get("message"))
                .or_else(|| value.get("message"))
        })
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| REQUEST_FALLBACK.to_string())
}

fn cliente_form(username: &str, cliente: &NuevoCliente) -> Form {
    Form::new()
        .text("username", username.to_string())
        .text("nombre", cliente.nombre.clone())
        .text("cedula", cliente.cedula.clone().unwrap_or_default())
        .text("obra", cliente.obra.clone().unwrap_or_default())
        .text(
            "estado",
            cliente.estado.clone().unwrap_or_else(|| "activo".to_string()),
        )
        .text("fecha", cliente.fecha.clone().unwrap_or_default())
}

fn obra_form(username: &str, obra: &NuevaObra) -> Form {
    Form::new()
        .text("username", username.to_string())
        .text("nombre", obra.nombre.clone())
        .text("ubicacion", obra.ubicacion.clone().unwrap_or_default())
        .text(
            "estado",
            obra.estado.clone().unwrap_or_else(|| "activa".to_string()),
        )
}

fn producto_form(username: &str, producto: &NuevoProducto) -> Form {
    Form::new()
        .text("username", username.to_string())
        .text("nombre", producto.nombre.clone())
        .text("precio", producto.precio.unwrap_or(0.0).to_string())
}

#[derive(Debug, Serialize)]
struct RegistroPayload<'a> {
    username: &'a str,
    fecha: &'a Option<String>,
    obra: &'a Option<String>,
    detalles: &'a [RegistroDetalle],
    #[serde(rename = "totalCantidad")]
    total_cantidad: i64,
    #[serde(rename = "totalCobrar")]
    total_cobrar: f64,
    #[serde(rename = "totalPagado")]
    total_pagado: f64,
    status: &'a str,
    #[serde(rename = "clientesAdicionales")]
    clientes_adicionales: &'a [String],
}

fn registro_payload<'a>(username: &'a str, registro: &'a NuevoRegistro) -> RegistroPayload<'a> {
    RegistroPayload {
        username,
        fecha: &registro.fecha,
        obra: &registro.obra,
        detalles: &registro.detalles,
        total_cantidad: registro.total_cantidad,
        total_cobrar: registro.total_cobrar,
        total_pagado: registro.total_pagado,
        status: registro.status.as_deref().unwrap_or("pendiente"),
        clientes_adicionales: &registro.clientes_adicionales,
    }
}

fn filtro_query<'a>(username: &'a str, filtro: &'a RegistroFiltro) -> Vec<(&'static str, &'a str)> {
    let mut query = vec![("username", username)];
    if let Some(obra) = filtro.obra.as_deref().filter(|value| !value.is_empty()) {
        query.push(("obra", obra));
    }
    if let Some(inicio) = filtro
        .fecha_inicio
        .as_deref()
        .filter(|value| !value.is_empty())
    {
        query.push(("fecha_inicio", inicio));
    }
    if let Some(fin) = filtro.fecha_fin.as_deref().filter(|value| !value.is_empty()) {
        query.push(("fecha_fin", fin));
    }
    query
}
