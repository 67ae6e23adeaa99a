//! Reports module for Kakebo
//!
//! Assembles the data sets fed to the advice and report collaborators and
//! renders the prompts used by text-generation backends.

pub mod assembler;
pub mod prompt;

pub use assembler::{
    assemble_advice, assemble_report, AdviceInput, AdviceLine, ReportExpense, ReportInput,
    ReportSavings, ReportTotals, REPORT_SECTIONS,
};
pub use prompt::{advice_prompt, classification_prompt, report_prompt, PromptStyle};
