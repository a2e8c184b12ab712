use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub username: String,
    pub birthdate: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub cedula: Option<String>,
    #[serde(default)]
    pub obra: Option<String>,
    pub estado: String,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NuevoCliente {
    pub nombre: String,
    pub cedula: Option<String>,
    pub obra: Option<String>,
    pub estado: Option<String>,
    pub fecha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obra {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub ubicacion: Option<String>,
    pub estado: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NuevaObra {
    pub nombre: String,
    pub ubicacion: Option<String>,
    pub estado: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub precio: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NuevoProducto {
    pub nombre: String,
    pub precio: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registro {
    pub id: i64,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub obra: Option<String>,
    #[serde(default, rename = "totalCantidad")]
    pub total_cantidad: i64,
    #[serde(default, rename = "totalCobrar")]
    pub total_cobrar: f64,
    #[serde(default, rename = "totalPagado")]
    pub total_pagado: f64,
    pub status: String,
    #[serde(default, rename = "clientesAdicionales")]
    pub clientes_adicionales: Vec<String>,
    #[serde(default)]
    pub detalles: Vec<RegistroDetalle>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NuevoRegistro {
    pub fecha: Option<String>,
    pub obra: Option<String>,
    pub total_cantidad: i64,
    pub total_cobrar: f64,
    pub total_pagado: f64,
    pub status: Option<String>,
    pub clientes_adicionales: Vec<String>,
    pub detalles: Vec<RegistroDetalle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistroDetalle {
    pub producto: String,
    #[serde(default)]
    pub cantidad: i64,
    #[serde(default)]
    pub precio: f64,
    #[serde(default)]
    pub cliente: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RegistroFiltro {
    pub obra: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportesResponse {
    pub totales: ReporteTotales,
    #[serde(default, rename = "porObra")]
    pub por_obra: BTreeMap<String, ReporteGrupo>,
    #[serde(default, rename = "porFecha")]
    pub por_fecha: BTreeMap<String, ReporteGrupo>,
    #[serde(default)]
    pub registros: Vec<ReporteRegistro>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReporteTotales {
    #[serde(default, rename = "totalCobrar")]
    pub total_cobrar: f64,
    #[serde(default, rename = "totalCobrado")]
    pub total_cobrado: f64,
    #[serde(default, rename = "totalPendiente")]
    pub total_pendiente: f64,
    #[serde(default, rename = "totalCantidad")]
    pub total_cantidad: i64,
    #[serde(default, rename = "totalRegistros")]
    pub total_registros: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReporteGrupo {
    #[serde(default, rename = "totalCobrar")]
    pub total_cobrar: f64,
    #[serde(default, rename = "totalCobrado")]
    pub total_cobrado: f64,
    #[serde(default, rename = "totalPendiente")]
    pub total_pendiente: f64,
    #[serde(default, rename = "totalCantidad")]
    pub total_cantidad: i64,
}

// Row shape the reportes endpoint returns; narrower than `Registro`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporteRegistro {
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub obra: Option<String>,
    #[serde(default, rename = "totalCantidad")]
    pub total_cantidad: i64,
    #[serde(default, rename = "totalCobrar")]
    pub total_cobrar: f64,
    #[serde(default, rename = "totalPagado")]
    pub total_pagado: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientesResponse {
    #[serde(default)]
    pub clientes: Vec<Cliente>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObrasResponse {
    #[serde(default)]
    pub obras: Vec<Obra>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductosResponse {
    #[serde(default)]
    pub productos: Vec<Producto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrosResponse {
    #[serde(default)]
    pub registros: Vec<Registro>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
