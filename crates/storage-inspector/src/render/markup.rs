use crate::entry::TypeTag;

/// Escapes text for embedding in markup content or a quoted attribute.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn type_icon(type_tag: TypeTag) -> &'static str {
    match type_tag {
        TypeTag::Object => "{}",
        TypeTag::Array => "[]",
        TypeTag::String => "\"\"",
        TypeTag::Number => "#",
        TypeTag::Boolean => "?",
        TypeTag::Null => "∅",
        TypeTag::Other => "·",
    }
}

pub fn key_list_item_markup(index: usize, key: &str, type_tag: TypeTag) -> String {
    format!(
        r#"<li data-index="{index}" data-type="{tag}"><span class="icon icon-{tag}">{icon}</span><span class="key">{key}</span></li>"#,
        tag = type_tag.as_str(),
        icon = escape_markup(type_icon(type_tag)),
        key = escape_markup(key),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_markup(r#"<img src=x onerror="a('b')">&"#),
            "&lt;img src=x onerror=&quot;a(&#39;b&#39;)&quot;&gt;&amp;"
        );
        assert_eq!(escape_markup("plain key"), "plain key");
    }

    #[test]
    fn item_markup_carries_icon_and_escaped_key() {
        assert_eq!(
            key_list_item_markup(2, "<b>", TypeTag::Object),
            r#"<li data-index="2" data-type="object"><span class="icon icon-object">{}</span><span class="key">&lt;b&gt;</span></li>"#
        );
        assert!(key_list_item_markup(0, "k", TypeTag::String).contains("&quot;&quot;"));
    }
}
