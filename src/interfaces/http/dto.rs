use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::beneficio::{Beneficio, BeneficioUpdate, NewBeneficio};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/v1/beneficios`.
#[derive(Debug, Deserialize)]
pub struct CreateBeneficioRequest {
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    /// Defaults to active when omitted.
    pub ativo: Option<bool>,
}

/// Body of `PUT /api/v1/beneficios/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateBeneficioRequest {
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    pub ativo: bool,
}

/// Body of `POST /api/v1/beneficios/transfer`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_id: u64,
    pub to_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

// -------------------------
// Response DTOs
// -------------------------

/// Wire shape of a record: `{id, nome, descricao, valor, ativo}`.
///
/// `valor` crosses the boundary as a JSON number; everything behind this type
/// is exact decimal.
#[derive(Debug, Serialize)]
pub struct BeneficioDto {
    pub id: u64,
    pub nome: String,
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    pub ativo: bool,
}

impl From<Beneficio> for BeneficioDto {
    fn from(beneficio: Beneficio) -> Self {
        Self {
            id: beneficio.id.0,
            nome: beneficio.name,
            descricao: beneficio.description,
            valor: beneficio.balance.value(),
            ativo: beneficio.active,
        }
    }
}

impl From<CreateBeneficioRequest> for NewBeneficio {
    fn from(req: CreateBeneficioRequest) -> Self {
        Self {
            name: req.nome,
            description: req.descricao,
            balance: req.valor,
            active: req.ativo.unwrap_or(true),
        }
    }
}

impl From<UpdateBeneficioRequest> for BeneficioUpdate {
    fn from(req: UpdateBeneficioRequest) -> Self {
        Self {
            name: req.nome,
            description: req.descricao,
            balance: req.valor,
            active: req.ativo,
        }
    }
}
