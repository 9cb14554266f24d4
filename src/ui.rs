use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Error,
}

/// Applies a consistent style to a string. Styling is dropped automatically
/// when stdout is not a terminal.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Error => style(text).red(),
    };
    styled.to_string()
}
