//! Data models for the showcase API
//!
//! The same shapes are used for the network body and for the cached
//! snapshot, so a document written to the cache reads back exactly like a
//! fresh response. Fields the engine doesn't use are kept in flattened maps
//! to survive that round trip.

use crate::format::{format_optional, format_url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default colour of the QR arrow when the template leaves it unset
pub const DEFAULT_QR_ARROW_COLOR: &str = "#00A300";

// ============================================================================
// Wire envelope
// ============================================================================

/// Top-level API body: `{ "response": { ... } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ShowcaseData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a showcase response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShowcaseData {
    #[serde(rename = "configCliente", default)]
    pub client: ClientConfig,
    #[serde(rename = "configTemplate", default)]
    pub template: TemplateConfig,
    /// Products in display order; the API may return `null` entries
    #[serde(rename = "produtos", default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Option<Item>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiEnvelope {
    /// Wraps display configuration and products into an envelope
    pub fn new(client: ClientConfig, template: TemplateConfig, items: Vec<Item>) -> Self {
        Self {
            response: Some(ShowcaseData {
                client,
                template,
                products: Some(items.into_iter().map(Some).collect()),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// Extracts what the engine needs, dropping `null` products
    ///
    /// Returns `None` when the body has no `response` or no `produtos`
    /// array at all. An empty array is still a showcase (with no items).
    pub fn into_showcase(self) -> Option<Showcase> {
        let data = self.response?;
        let products = data.products?;
        Some(Showcase {
            client: data.client,
            template: data.template,
            items: products.into_iter().flatten().collect(),
        })
    }
}

// ============================================================================
// Display configuration
// ============================================================================

/// Client (shop) configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_mercado_url_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientConfig {
    /// Normalised logo URL, if the client has one
    pub fn logo_url(&self) -> Option<String> {
        format_optional(self.logo_mercado_url_text.as_deref())
    }
}

/// Template configuration: the named colour slots of the layout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateConfig {
    /// Main background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cor_01_text: Option<String>,
    /// Secondary background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cor_02_text: Option<String>,
    /// Product description text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cor_texto_01_text: Option<String>,
    /// Price text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cor_texto_02_text: Option<String>,
    /// QR arrow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cor_03_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateConfig {
    /// QR arrow colour, falling back to [`DEFAULT_QR_ARROW_COLOR`]
    pub fn qr_arrow_color(&self) -> &str {
        self.cor_03_text
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_QR_ARROW_COLOR)
    }

    /// CSS custom properties for the configured colour slots
    ///
    /// Unset slots are omitted, except the QR arrow which always has a value.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let slots = [
            ("--cor-fundo-principal", &self.cor_01_text),
            ("--cor-fundo-secundario", &self.cor_02_text),
            ("--cor-texto-descricao", &self.cor_texto_01_text),
            ("--cor-texto-preco", &self.cor_texto_02_text),
        ];
        let mut vars: Vec<(&'static str, String)> = slots
            .into_iter()
            .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
            .collect();
        vars.push(("--cor-seta-qr", self.qr_arrow_color().to_string()));
        vars
    }
}

// ============================================================================
// Items
// ============================================================================

/// One product slide
///
/// Every field is optional on the wire; a missing name or price renders as
/// empty text, and missing images leave their slot empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Display name
    #[serde(rename = "nome_text", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pre-formatted price, displayed as is
    #[serde(rename = "valor_text", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Primary product image
    #[serde(
        rename = "imagem_produto_text",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Badge ("selo") image
    #[serde(
        rename = "selo_produto_text",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub badge: Option<String>,
    /// QR code image
    #[serde(
        rename = "t_qr_produto_text",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qr_image: Option<String>,
    /// Caption shown under the QR code
    #[serde(rename = "texto_qr_text", default, skip_serializing_if = "Option::is_none")]
    pub qr_caption: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Item with a name and a price and no images
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_badge(mut self, url: impl Into<String>) -> Self {
        self.badge = Some(url.into());
        self
    }

    pub fn with_qr(mut self, url: impl Into<String>, caption: Option<String>) -> Self {
        self.qr_image = Some(url.into());
        self.qr_caption = caption;
        self
    }

    /// Name, or an empty string
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Price, or an empty string
    pub fn display_price(&self) -> &str {
        self.price.as_deref().unwrap_or_default()
    }

    /// Whether a non-empty badge URL is present
    pub fn has_badge(&self) -> bool {
        self.badge.as_deref().is_some_and(|b| !b.is_empty())
    }

    /// Normalised URLs of every image this slide shows
    ///
    /// Order is primary image, badge, QR code; empty fields are skipped.
    pub fn image_urls(&self) -> Vec<String> {
        [&self.image, &self.badge, &self.qr_image]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .filter(|url| !url.is_empty())
            .map(format_url)
            .collect()
    }
}

/// Display configuration plus the ordered item list of one data load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Showcase {
    pub client: ClientConfig,
    pub template: TemplateConfig,
    pub items: Vec<Item>,
}
