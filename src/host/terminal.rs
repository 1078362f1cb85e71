use super::{Dialogs, Message, MultiInputPrompt, PromptResponse, Severity};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

/// Answer that empties a pre-filled field.
pub const CLEAR_FIELD: &str = "-";

/// Line-based dialogs for an interactive terminal.
pub struct TerminalDialogs<R, W> {
    input: R,
    output: W,
    prefill: BTreeMap<String, String>,
}

impl TerminalDialogs<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            prefill: BTreeMap::new(),
        }
    }

    /// Start fields with these values instead of the prompt's own, keyed on
    /// the field label.
    pub fn with_prefill(mut self, prefill: BTreeMap<String, String>) -> Self {
        self.prefill = prefill;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` on end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn choose_button(&mut self, prompt: &MultiInputPrompt) -> Result<usize> {
        let default = prompt
            .buttons
            .get(prompt.default_choice)
            .cloned()
            .unwrap_or_default();

        loop {
            write!(self.output, "{} [{}]: ", prompt.buttons.join("/"), default)?;
            self.output.flush()?;

            let Some(answer) = self.read_line()? else {
                return Ok(prompt.close_choice);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(prompt.default_choice);
            }
            if let Some(index) = prompt
                .buttons
                .iter()
                .position(|button| button.eq_ignore_ascii_case(answer))
            {
                return Ok(index);
            }

            writeln!(self.output, "Invalid selection. Try again.")?;
        }
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn read_multi_input(&mut self, prompt: &MultiInputPrompt) -> Result<PromptResponse> {
        writeln!(self.output, "{}\n{}", prompt.title, prompt.message)?;
        if let Some(help) = &prompt.help {
            writeln!(self.output, "({})", help)?;
        }
        writeln!(
            self.output,
            "(Enter keeps the value in brackets, {} clears it)",
            CLEAR_FIELD
        )?;

        let mut values = Vec::with_capacity(prompt.labels.len());
        for (i, label) in prompt.labels.iter().enumerate() {
            let initial = match self.prefill.get(label) {
                Some(value) => value.clone(),
                None => prompt.initial_contents.get(i).cloned().unwrap_or_default(),
            };
            write!(self.output, "{} [{}]: ", label, initial)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(PromptResponse {
                    button: prompt.close_choice,
                    values: prompt.initial_contents.clone(),
                });
            };
            let answer = line.trim();
            values.push(if answer.is_empty() {
                initial
            } else if answer == CLEAR_FIELD {
                String::new()
            } else {
                line
            });
        }

        let button = self.choose_button(prompt)?;
        Ok(PromptResponse { button, values })
    }

    fn display_message(&mut self, message: &Message) {
        if let Err(err) = write_message(&mut self.output, message) {
            tracing::warn!(error = %err, "failed to display message");
        }
    }
}

/// Non-interactive dialogs: every prompt is accepted with its pre-filled
/// values, replaced by any override keyed on the field label.
pub struct BatchDialogs<W> {
    overrides: BTreeMap<String, String>,
    output: W,
}

impl BatchDialogs<io::Stdout> {
    pub fn stdout(overrides: BTreeMap<String, String>) -> Self {
        Self::new(overrides, io::stdout())
    }
}

impl<W: Write> BatchDialogs<W> {
    pub fn new(overrides: BTreeMap<String, String>, output: W) -> Self {
        Self { overrides, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> Dialogs for BatchDialogs<W> {
    fn read_multi_input(&mut self, prompt: &MultiInputPrompt) -> Result<PromptResponse> {
        let values = prompt
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| match self.overrides.get(label) {
                Some(value) => value.clone(),
                None => prompt.initial_contents.get(i).cloned().unwrap_or_default(),
            })
            .collect();

        Ok(PromptResponse {
            button: prompt.default_choice,
            values,
        })
    }

    fn display_message(&mut self, message: &Message) {
        if let Err(err) = write_message(&mut self.output, message) {
            tracing::warn!(error = %err, "failed to display message");
        }
    }
}

fn write_message(out: &mut impl Write, message: &Message) -> io::Result<()> {
    match message.severity {
        Severity::Error => writeln!(out, "✗ {}: {}", message.title, message.text)?,
        Severity::Message => writeln!(out, "✓ {}: {}", message.title, message.text)?,
    }
    if let (Some(details), true) = (&message.details, message.details_expanded) {
        match &message.details_label {
            Some(label) => writeln!(out, "  {}: {}", label, details)?,
            None => writeln!(out, "  {}", details)?,
        }
    }
    out.flush()
}
