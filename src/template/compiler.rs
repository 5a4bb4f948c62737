//! Template Compiler - markup → anchors + binding descriptors.
//!
//! Two sequential passes over the markup:
//!
//! 1. Text: `{{name}}` / `{{name()}}` become `<span id="ng-N">value</span>`
//! 2. Events: `(click)="name()"` becomes `id="ng-N"`
//!
//! Names are validated against the component's member table. Anything outside
//! the two grammars (uppercase names, arguments, spaces) is left as literal text.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::binding::{CompiledTemplate, EventBinding, Strategy, TextBinding};
use super::ids::BindingIds;
use crate::component::{AnyComponent, MemberKind};
use crate::config::RenderOptions;
use crate::dom::escape_text;
use crate::error::{RenderError, RenderResult};
use crate::reactive::untracked;

// =============================================================================
// Grammars
// =============================================================================

/// `{{name}}`, or `{{name()}}` for a reactive member.
static TEXT_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([a-z-]+)(\(\))?\}\}").unwrap());

/// `(click)="name()"`
static CLICK_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\(click\)="(\w+)\(\)""#).unwrap());

// =============================================================================
// Compile
// =============================================================================

/// Compile the component's own template.
pub fn compile(
    component: &dyn AnyComponent,
    ids: &mut BindingIds,
    options: &RenderOptions,
) -> RenderResult<CompiledTemplate> {
    compile_markup(component, component.template(), ids, options)
}

/// Compile `markup` against `component`'s members.
pub fn compile_markup(
    component: &dyn AnyComponent,
    markup: &str,
    ids: &mut BindingIds,
    options: &RenderOptions,
) -> RenderResult<CompiledTemplate> {
    let (markup, text) = bind_text(component, markup, ids, options)?;
    let (markup, events) = bind_events(component, &markup, ids, options)?;
    Ok(CompiledTemplate {
        markup,
        text,
        events,
    })
}

fn bind_text(
    component: &dyn AnyComponent,
    markup: &str,
    ids: &mut BindingIds,
    options: &RenderOptions,
) -> RenderResult<(String, Vec<TextBinding>)> {
    let mut out = String::with_capacity(markup.len());
    let mut bindings = Vec::new();
    let mut last = 0;

    for caps in TEXT_BINDING.captures_iter(markup) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let invoked = caps.get(2).is_some();

        let id = ids.next_id();
        let strategy = text_strategy(component, name, invoked, options)?;
        let source = component
            .text_source(name)
            .ok_or_else(|| unresolved(component, name))?;
        // Initial paint only; must not subscribe whoever is rendering us.
        let value = untracked(|| source()).unwrap_or_default();

        trace!(id = id.0, member = name, ?strategy, "text binding");
        out.push_str(&markup[last..whole.start()]);
        let _ = write!(
            out,
            r#"<span id="{}">{}</span>"#,
            id.anchor(&options.anchor_prefix),
            escape_text(&value)
        );
        last = whole.end();

        bindings.push(TextBinding {
            id,
            member: name.to_string(),
            strategy,
            last_rendered: value,
        });
    }
    out.push_str(&markup[last..]);

    Ok((out, bindings))
}

fn bind_events(
    component: &dyn AnyComponent,
    markup: &str,
    ids: &mut BindingIds,
    options: &RenderOptions,
) -> RenderResult<(String, Vec<EventBinding>)> {
    let mut out = String::with_capacity(markup.len());
    let mut bindings = Vec::new();
    let mut last = 0;

    for caps in CLICK_BINDING.captures_iter(markup) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();

        let id = ids.next_id();
        if component.member_kind(name).is_none() {
            return Err(unresolved(component, name));
        }

        trace!(id = id.0, handler = name, "click binding");
        out.push_str(&markup[last..whole.start()]);
        let _ = write!(out, r#"id="{}""#, id.anchor(&options.anchor_prefix));
        last = whole.end();

        bindings.push(EventBinding {
            id,
            handler: name.to_string(),
        });
    }
    out.push_str(&markup[last..]);

    Ok((out, bindings))
}

/// Decide how a text binding stays current, or reject the member.
fn text_strategy(
    component: &dyn AnyComponent,
    name: &str,
    invoked: bool,
    options: &RenderOptions,
) -> RenderResult<Strategy> {
    let kind = component
        .member_kind(name)
        .ok_or_else(|| unresolved(component, name))?;

    match (kind, invoked) {
        (MemberKind::Reactive, true) if options.push_enabled() => Ok(Strategy::Push),
        (MemberKind::Reactive, _) => Ok(Strategy::Pull),
        (MemberKind::Field, false) => Ok(Strategy::Pull),
        (MemberKind::Field, true) => Err(misuse(component, name, "a reactive field for `()` interpolation")),
        (MemberKind::Handler, _) => Err(misuse(component, name, "a field, found a handler")),
    }
}

fn unresolved(component: &dyn AnyComponent, name: &str) -> RenderError {
    RenderError::UnresolvedBinding {
        member: name.to_string(),
        component: component.selector().to_string(),
    }
}

fn misuse(component: &dyn AnyComponent, name: &str, expected: &'static str) -> RenderError {
    RenderError::TypeMisuse {
        member: name.to_string(),
        component: component.selector().to_string(),
        expected,
    }
}
