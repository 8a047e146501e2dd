use maud::{Markup, Render, html};

use crate::{
    GENERATOR,
    navigation::{NavigationConfig, NavigationEntry},
    page::RenderResult,
};

/// Renders as a link. External links open in a new tab.
impl Render for NavigationEntry {
    fn render(&self) -> Markup {
        let external = self.target.is_external();
        html! {
            a href=(self.target.href())
                data-icon=(self.icon.as_str())
                target=[external.then_some("_blank")]
                rel=[external.then_some("noopener noreferrer")] {
                span.label { (self.label) }
                @if let Some(count) = self.count {
                    " "
                    span.count { (count) }
                }
            }
        }
    }
}

/// Renders every section as a list, in menu order.
impl Render for NavigationConfig {
    fn render(&self) -> Markup {
        html! {
            nav {
                @for (section, entries) in self.sections() {
                    ul data-section=(section.name()) {
                        @for entry in entries {
                            li { (entry) }
                        }
                    }
                }
            }
        }
    }
}

/// Can be used to create a generator tag in the output HTML. See [`GENERATOR`](crate::GENERATOR).
pub fn generator() -> Markup {
    html! {
        meta name="generator" content=(GENERATOR);
    }
}

impl From<maud::Markup> for RenderResult {
    fn from(val: maud::Markup) -> Self {
        RenderResult::Text(val.into_string())
    }
}
