//! EduLearn AI tools: prompt builders, a generative-language client, a
//! tolerant response parser, and the widget state machine that ties them
//! together. The `edulearn` binary is a terminal host for the widgets.

pub mod error;
pub mod llm;
pub mod parse;
pub mod scores;
pub mod speech;
pub mod state;
pub mod tools;
pub mod widget;
