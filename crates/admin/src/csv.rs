//! Semicolon-delimited product import/export.
//!
//! The format is the one the storefront has always exchanged with
//! spreadsheet tools: `;` as the delimiter (values frequently contain
//! commas), a UTF-8 BOM so Excel detects the encoding, and conventional
//! quoting (a field containing `;`, a quote or a newline is wrapped in
//! quotes with inner quotes doubled).

use chrono::Utc;
use nursery_core::{Attribute, CategoryId, Product, ProductId};
use rust_decimal::Decimal;
use tracing::warn;

/// Column layout, fixed by position. Import reads by index and ignores the
/// header text, so renamed headers still parse.
pub const HEADERS: [&str; 11] = [
    "SKU",
    "Name",
    "Price",
    "SpecialPrice",
    "CategoryId",
    "Stock",
    "Status",
    "Description",
    "MainImage",
    "AdditionalImages",
    "Attributes",
];

const BOM: char = '\u{feff}';
const DELIMITER: char = ';';
const FALLBACK_IMAGE: &str = "https://picsum.photos/200";

/// Result of parsing a CSV document.
#[derive(Debug, Default)]
pub struct CsvImport {
    /// Parsed product drafts, each with a fresh timestamp-derived ID.
    pub products: Vec<Product>,
    /// Rows dropped for missing SKU/name or too few columns.
    pub skipped: usize,
}

/// Render products as a semicolon CSV document, BOM included.
#[must_use]
pub fn export_products(products: &[Product]) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(&join_row(&HEADERS.map(String::from)));
    out.push('\n');
    for product in products {
        out.push_str(&join_row(&product_row(product)));
        out.push('\n');
    }
    out
}

/// Parse a CSV document into product drafts.
///
/// Unparsable rows are skipped and counted, never fatal: a spreadsheet
/// with a few broken lines should still import the rest. Numeric fields
/// degrade to defaults (price `0`, category `1`, stock `0`).
#[must_use]
pub fn import_products(content: &str) -> CsvImport {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let mut import = CsvImport::default();
    // Row index spread over a timestamp base keeps IDs distinct within one
    // import and unique enough across imports.
    let mut next_id = Utc::now().timestamp_millis();

    for (index, fields) in split_records(content).into_iter().skip(1).enumerate() {
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        match parse_row(&fields, next_id) {
            Some(product) => {
                import.products.push(product);
            }
            None => {
                warn!(row = index + 2, "skipping malformed csv row");
                import.skipped += 1;
            }
        }
        next_id += 1;
    }
    import
}

fn product_row(product: &Product) -> [String; 11] {
    // The first image doubles as the main image; exporting it again under
    // AdditionalImages would duplicate it on reimport.
    let additional: Vec<&str> = match product.images.split_first() {
        Some((first, rest)) if *first == product.image => {
            rest.iter().map(String::as_str).collect()
        }
        _ => product.images.iter().map(String::as_str).collect(),
    };
    let attributes: Vec<String> = product
        .attributes
        .iter()
        .map(|a| format!("{}:{}", a.name, a.text))
        .collect();
    [
        product.sku.clone(),
        product.name.clone(),
        product.price.to_string(),
        product
            .special_price
            .map(|p| p.to_string())
            .unwrap_or_default(),
        product.category_id.to_string(),
        product.stock.to_string(),
        if product.status { "1" } else { "0" }.to_string(),
        product.description.clone().unwrap_or_default(),
        product.image.clone(),
        // Comma-joined, unlike attributes; the column has always been
        // written that way and existing spreadsheets rely on it.
        additional.join(","),
        attributes.join("|"),
    ]
}

fn parse_row(fields: &[String], id: i64) -> Option<Product> {
    if fields.len() < 2 {
        return None;
    }
    let sku = fields.first().map(|s| s.trim()).unwrap_or_default();
    let name = fields.get(1).map(|s| s.trim()).unwrap_or_default();
    if sku.is_empty() || name.is_empty() {
        return None;
    }

    let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or_default();
    let price = field(2).trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
    let special_price = field(3).trim().parse::<Decimal>().ok();
    let category_id = field(4).trim().parse::<i64>().unwrap_or(1);
    let stock = field(5).trim().parse::<u32>().unwrap_or(0);
    let status_field = field(6).trim();
    let status = status_field == "1" || status_field.eq_ignore_ascii_case("true");
    let description = match field(7) {
        "" => None,
        text => Some(text.to_string()),
    };
    let image = match field(8).trim() {
        "" => FALLBACK_IMAGE.to_string(),
        url => url.to_string(),
    };
    let mut images = vec![image.clone()];
    images.extend(
        field(9)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    );
    let attributes: Vec<Attribute> = field(10)
        .split('|')
        .filter_map(|pair| {
            // splitn keeps colons inside the value ("Size:120x60:mm").
            let mut parts = pair.splitn(2, ':');
            let name = parts.next()?.trim();
            let text = parts.next()?.trim();
            if name.is_empty() {
                return None;
            }
            Some(Attribute {
                name: name.to_string(),
                text: text.to_string(),
            })
        })
        .collect();

    Some(Product {
        id: ProductId::new(id),
        category_id: CategoryId::new(category_id),
        name: name.to_string(),
        price,
        special_price,
        image,
        images,
        sku: sku.to_string(),
        stock,
        status,
        description,
        attributes,
        variant_labels: Vec::new(),
        variant_values: Vec::new(),
        variants: Vec::new(),
        sticker_ids: Vec::new(),
        is_bundle: false,
        bundle_items: Vec::new(),
    })
}

fn join_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn escape_field(field: &str) -> String {
    if field.contains(DELIMITER) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split a document into records of fields, honoring quotes: unquoted
/// semicolons separate fields, unquoted newlines separate records, doubled
/// quotes collapse. A newline inside a quoted field stays part of the
/// field, so multi-line descriptions survive the round trip.
fn split_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            DELIMITER if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(fields);
    }
    records
}
