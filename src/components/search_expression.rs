use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchTag {
    #[default]
    Any,
    Title,
    Artist,
    Album,
    AlbumArtist,
}

impl SearchTag {
    pub const ALL: [SearchTag; 5] = [
        Self::Any,
        Self::Title,
        Self::Artist,
        Self::Album,
        Self::AlbumArtist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::Album => "Album",
            Self::AlbumArtist => "AlbumArtist",
        }
    }

    fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOperator {
    #[default]
    Contains,
    Equals,
    StartsWith,
}

impl SearchOperator {
    pub const ALL: [SearchOperator; 3] = [Self::Contains, Self::Equals, Self::StartsWith];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "==",
            Self::StartsWith => "starts_with",
        }
    }

    fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == value)
            .unwrap_or_default()
    }
}

/// Backslash-escapes quotes and backslashes for an MPD filter value.
pub fn escape_mpd_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\'' | '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// MPD filter expression for one condition; empty when there is no value.
pub fn build_expression(tag: SearchTag, operator: SearchOperator, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    format!(
        "(({} {} '{}'))",
        tag.as_str(),
        operator.as_str(),
        escape_mpd_value(value)
    )
}

/// Filter input for a list view. Writes the built expression into
/// `expression` whenever one of the inputs changes.
#[component]
pub fn SearchExpression(view_id: String, expression: Signal<String>) -> Element {
    let mut tag = use_signal(SearchTag::default);
    let mut operator = use_signal(SearchOperator::default);
    let mut value = use_signal(String::new);
    let mut expression = expression;

    let mut update = move || {
        let built = build_expression(tag(), operator(), &value());
        if *expression.peek() != built {
            expression.set(built);
        }
    };

    rsx! {
        div { id: "{view_id}SearchExpression", class: "flex flex-wrap items-center gap-2",
            select {
                class: "px-2 py-1.5 rounded-lg bg-zinc-800 text-zinc-200 text-sm",
                value: tag().as_str(),
                onchange: move |e: Event<FormData>| {
                    tag.set(SearchTag::from_value(&e.value()));
                    update();
                },
                for choice in SearchTag::ALL {
                    option { value: choice.as_str(), "{choice.as_str()}" }
                }
            }
            select {
                class: "px-2 py-1.5 rounded-lg bg-zinc-800 text-zinc-200 text-sm",
                value: operator().as_str(),
                onchange: move |e: Event<FormData>| {
                    operator.set(SearchOperator::from_value(&e.value()));
                    update();
                },
                for choice in SearchOperator::ALL {
                    option { value: choice.as_str(), "{choice.as_str()}" }
                }
            }
            input {
                r#type: "search",
                placeholder: "Filter",
                class: "flex-1 min-w-40 px-3 py-1.5 rounded-lg bg-zinc-800 text-white text-sm",
                value: "{value}",
                oninput: move |e: Event<FormData>| {
                    value.set(e.value());
                    update();
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_builds_no_expression() {
        assert_eq!(build_expression(SearchTag::Any, SearchOperator::Contains, "  "), "");
    }

    #[test]
    fn expression_uses_tag_and_operator() {
        assert_eq!(
            build_expression(SearchTag::Artist, SearchOperator::Equals, "Nina Simone"),
            "((Artist == 'Nina Simone'))"
        );
        assert_eq!(
            build_expression(SearchTag::Any, SearchOperator::StartsWith, "blue"),
            "((any starts_with 'blue'))"
        );
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(escape_mpd_value(r#"Don't "stop" \ now"#), r#"Don\'t \"stop\" \\ now"#);
    }

    #[test]
    fn unknown_select_values_fall_back_to_defaults() {
        assert_eq!(SearchTag::from_value("Genre"), SearchTag::Any);
        assert_eq!(SearchOperator::from_value("=~"), SearchOperator::Contains);
    }
}
