//! Variable queries over a template's elements.
//!
//! Only text, variable and barcode elements bind data. Both queries walk
//! visible elements in compile order, so the first binding element of a
//! field is the one that prints first.

use super::sorted_elements;
use super::types::{Binding, DesignElement};

/// Fillable variable names: bound data fields that are not RFID banks,
/// de-duplicated, in compile order.
///
/// These are the names a batch data source has to supply.
///
/// ```
/// use labelzpl::document::*;
///
/// let elements = vec![
///     DesignElement::new(
///         ElementBase::new("a", 0.0, 9.0, 10.0, 5.0),
///         ElementKind::Text(TextElement::new("").bound("名称")),
///     ),
///     DesignElement::new(
///         ElementBase::new("b", 0.0, 1.0, 10.0, 5.0),
///         ElementKind::Barcode(BarcodeElement::new("CODE128", "").bound("sku")),
///     ),
///     DesignElement::new(
///         ElementBase::new("c", 0.0, 2.0, 10.0, 5.0),
///         ElementKind::Text(TextElement::new("").bound("EPC")),
///     ),
/// ];
/// assert_eq!(collect_fillable_variables(&elements), vec!["sku", "名称"]);
/// ```
pub fn collect_fillable_variables(elements: &[DesignElement]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for element in sorted_elements(elements) {
        if let Binding::Variable(name) = element.binding()
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    names
}

/// Display name for every bound data field, RFID banks included, in
/// compile order.
///
/// The first element binding a field decides: its `name` if non-empty,
/// otherwise the field name itself.
pub fn variable_display_names(elements: &[DesignElement]) -> Vec<(String, String)> {
    let mut names: Vec<(String, String)> = Vec::new();
    for element in sorted_elements(elements) {
        let Some(field) = element.data_field() else {
            continue;
        };
        if names.iter().any(|(f, _)| f == field) {
            continue;
        }
        let display = if element.base.name.is_empty() {
            field.to_string()
        } else {
            element.base.name.clone()
        };
        names.push((field.to_string(), display));
    }
    names
}
