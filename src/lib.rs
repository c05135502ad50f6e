//! # Folio
//!
//! A single-page developer portfolio: a static site generator plus the
//! headless view-state coordinator that drives the page's interactive
//! behaviour.
//!
//! # Architecture
//!
//! ```text
//! content/  →  generate  →  dist/index.html + style.<hash>.css + assets/
//!     │
//!     └────→  view::build_page  →  PageModel  →  app::Portfolio  ←  events
//! ```
//!
//! The same content feeds two consumers. [`generate`] renders the markup.
//! [`view::build_page`] builds an in-memory model of that markup which the
//! [`app::Portfolio`] coordinator mutates in response to user events, with
//! every timer on a virtual clock ([`timeline`]). Sessions recorded as JSON
//! can be replayed against the coordinator ([`session`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading over stock defaults, validation, color CSS |
//! | [`catalog`] | The project records shown in the grid, modal and gallery |
//! | [`view`] | The [`view::Surface`] styling-hook contract and its in-memory page |
//! | [`timeline`] | Virtual clock and deferred tasks |
//! | [`theme`] | Light/dark preference and its persistence |
//! | [`navigation`] | Mobile menu, scrolled header, active link, anchor scrolling |
//! | [`animation`] | One-shot reveals, skill bars, counters, typewriter, rotating titles |
//! | [`filter`] | Category filter over the project cards |
//! | [`modal`] | Project details modal and image gallery |
//! | [`notify`] | Toast notifications |
//! | [`popup`] | Floating WhatsApp chat popup |
//! | [`contact`] | Contact form and submission backends |
//! | [`app`] | Event dispatch wiring every controller to the page |
//! | [`session`] | Scripted session replay |
//! | [`generate`] | HTML rendering with Maud and site output |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Headless First
//!
//! Every controller talks to the page through [`view::Surface`]: add or
//! remove a class, set text, set an inline style, read geometry. None of
//! them know whether the page is a real document or a [`view::PageModel`].
//! That keeps the behaviour testable without a browser and lets the CLI
//! replay a session deterministically.
//!
//! ## Deferred Work Is Data
//!
//! Controllers never sleep or spawn. They return deferred tasks with a delay,
//! and the coordinator queues them on a [`timeline::Timeline`]. Advancing the
//! clock runs due tasks in due-time order, ties in scheduling order.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a build error and every interpolation is escaped.

pub mod animation;
pub mod app;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod filter;
pub mod generate;
pub mod logging;
pub mod modal;
pub mod navigation;
pub mod notify;
pub mod output;
pub mod popup;
pub mod session;
pub mod theme;
pub mod timeline;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
