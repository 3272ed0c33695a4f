//! Reference rate table.
//!
//! The table is a `;`-delimited file with one header row. Column names are
//! the ones used by the sales team's spreadsheet; rows are parsed into
//! [`ServiceDescriptor`]s once, at startup.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::pricing::models::ServiceDescriptor;
use crate::pricing::parsing::parse_price;
use crate::pricing::rules::ConditionalRule;

const COL_SERVICE_TYPE: &str = "TIPO DE SERVICIO";
const COL_CATEGORY: &str = "CATEGORIA";
const COL_THICKNESS: &str = "ESPESOR";
const COL_GAUGE: &str = "MILIMETRO O CALIBRE";
const COL_PRICE: &str = "PRECIO BASE EN PIE2";
const COL_LIGHTING: &str = "CON LUZ";
const COL_MINIMUM: &str = "TAMAÑO MINIMO EN PIE2";
const COL_INSTALLATION: &str = "INSTALACION INCLUIDA";
const COL_CONDITION: &str = "CONDICIONAL";

const BOM: char = '\u{FEFF}';

/// Loaded reference services
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: Vec<ServiceDescriptor>,
}

impl Catalog {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self { services }
    }

    /// Load the rate table from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut raw = String::new();
        File::open(path)?.read_to_string(&mut raw)?;
        let catalog = Self::parse(&raw)?;
        info!(
            "Loaded {} services from {}",
            catalog.services.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse rate table text.
    ///
    /// Rows shorter than the header, blank rows and rows without a service
    /// type are skipped.
    pub fn parse(data: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(data.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches(BOM).trim().to_string())
            .collect();

        let mut services = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            if record.len() < headers.len() {
                if record.iter().any(|f| !f.trim().is_empty()) {
                    warn!(
                        "Skipping rate table row {}: {} fields, expected {}",
                        index + 2,
                        record.len(),
                        headers.len()
                    );
                }
                continue;
            }

            let row: HashMap<&str, &str> = headers
                .iter()
                .map(String::as_str)
                .zip(record.iter().map(str::trim))
                .collect();

            match service_from_row(&row) {
                Some(service) => services.push(service),
                None => debug!("Skipping rate table row {} without service type", index + 2),
            }
        }

        Ok(Self { services })
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Distinct service types in table order
    pub fn service_types(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for service in &self.services {
            if !seen.contains(&service.service_type.as_str()) {
                seen.push(service.service_type.as_str());
            }
        }
        seen
    }

    /// Distinct categories offered for a service type, in table order
    pub fn categories_for(&self, service_type: &str) -> Vec<&str> {
        let mut seen = Vec::new();
        for service in self.services.iter().filter(|s| s.service_type == service_type) {
            if !seen.contains(&service.category.as_str()) {
                seen.push(service.category.as_str());
            }
        }
        seen
    }

    /// Services matching a type and category (one per thickness)
    pub fn services_for(&self, service_type: &str, category: &str) -> Vec<&ServiceDescriptor> {
        self.services
            .iter()
            .filter(|s| s.service_type == service_type && s.category == category)
            .collect()
    }

    /// Look up a single service.
    ///
    /// Without a thickness the first matching row is returned.
    pub fn find(
        &self,
        service_type: &str,
        category: &str,
        thickness: Option<&str>,
    ) -> Result<&ServiceDescriptor> {
        self.services_for(service_type, category)
            .into_iter()
            .find(|s| thickness.map_or(true, |t| s.thickness == t))
            .ok_or_else(|| {
                AppError::ServiceNotFound(match thickness {
                    Some(t) => format!("{} / {} / {}", service_type, category, t),
                    None => format!("{} / {}", service_type, category),
                })
            })
    }
}

fn service_from_row(row: &HashMap<&str, &str>) -> Option<ServiceDescriptor> {
    let field = |name: &str| row.get(name).copied().unwrap_or("");
    let optional = |name: &str| {
        let value = field(name);
        (!value.is_empty()).then(|| value.to_string())
    };

    let service_type = field(COL_SERVICE_TYPE);
    if service_type.is_empty() {
        return None;
    }

    let condition = optional(COL_CONDITION);
    let rule = ConditionalRule::from_condition_text(condition.as_deref());

    Some(ServiceDescriptor {
        service_type: service_type.to_string(),
        category: field(COL_CATEGORY).to_string(),
        thickness: field(COL_THICKNESS).to_string(),
        gauge: field(COL_GAUGE).to_string(),
        price_per_sq_ft: parse_price(Some(field(COL_PRICE))),
        with_lighting: field(COL_LIGHTING) == "SI",
        minimum_sq_ft: parse_price(Some(field(COL_MINIMUM))),
        installation_included: optional(COL_INSTALLATION),
        condition,
        rule,
    })
}
