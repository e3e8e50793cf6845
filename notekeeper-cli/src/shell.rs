//! Interactive notes shell.
//!
//! Each line is one command against a [`NoteManager`]. The shell owns the
//! manager for the whole session, so the cache, draft and mode live exactly as
//! long as the shell does.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use log::debug;
use notekeeper_core::{
    ApiClient, ContactMessage, DeleteOutcome, LoadOutcome, Mode, Note, NoteId, NoteManager,
    NotesApi, Result, SubmitOutcome,
};

pub const HELP: &str = "\
Commands:
  load                  refresh notes from the server
  list                  show notes matching the current search
  search [text]         set (or clear) the search text
  toggle search|form|list
  new                   start a new note
  title <text>          set the draft title
  content <text>        set the draft content
  tags <a, b, c>        set the draft tags
  date <YYYY-MM-DD>     set the draft date
  draft                 show the draft
  edit <id>             edit an existing note
  cancel                abandon the draft
  submit                save the draft
  delete <id>           delete a note (asks first)
  contact               send a message to the site operators
  logout                end the session and quit
  help                  show this text
  quit                  leave the shell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Search,
    Form,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    List,
    Search(String),
    Toggle(Panel),
    New,
    Title(String),
    Content(String),
    Tags(String),
    Date(NaiveDate),
    Draft,
    Edit(NoteId),
    Cancel,
    Submit,
    Delete(NoteId),
    Contact,
    Logout,
    Help,
    Quit,
}

/// Parses one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "load" | "reload" => Command::Load,
        "list" | "ls" => Command::List,
        "search" | "find" => Command::Search(rest.to_string()),
        "toggle" => Command::Toggle(match rest {
            "search" => Panel::Search,
            "form" => Panel::Form,
            "list" => Panel::List,
            other => return Err(format!("Unknown panel: {other:?}")),
        }),
        "new" | "add" => Command::New,
        "title" => Command::Title(rest.to_string()),
        "content" => Command::Content(rest.to_string()),
        "tags" => Command::Tags(rest.to_string()),
        "date" => Command::Date(
            NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .map_err(|_| format!("Expected a date like 2024-05-17, got {rest:?}"))?,
        ),
        "draft" => Command::Draft,
        "edit" => Command::Edit(parse_id(rest)?),
        "cancel" => Command::Cancel,
        "submit" | "save" => Command::Submit,
        "delete" | "rm" => Command::Delete(parse_id(rest)?),
        "contact" => Command::Contact,
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> std::result::Result<NoteId, String> {
    raw.parse()
        .map_err(|_| format!("Expected a note id, got {raw:?}"))
}

/// Formats a note for the list view.
pub fn render_note(note: &Note) -> String {
    format!(
        "[{}] {}\n    {}\n    Tags: {}\n    Date: {}",
        note.id,
        note.title,
        note.content,
        note.tags.join(", "),
        note.date.format("%x"),
    )
}

enum Flow {
    Continue,
    Exit,
}

/// A notes session bound to an input and an output stream.
pub struct Shell<A: NotesApi, R: BufRead, W: Write> {
    manager: NoteManager<A>,
    client: ApiClient,
    input: R,
    output: W,
}

impl<A: NotesApi, R: BufRead, W: Write> Shell<A, R, W> {
    /// `client` is used for the account and contact endpoints; notes go
    /// through the manager's own API.
    pub fn new(manager: NoteManager<A>, client: ApiClient, input: R, output: W) -> Self {
        Self {
            manager,
            client,
            input,
            output,
        }
    }

    pub fn manager(&self) -> &NoteManager<A> {
        &self.manager
    }

    /// Reads and executes commands until `quit`, `logout` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}> ", self.prompt_marker())?;
            self.output.flush()?;
            let Some(line) = read_line(&mut self.input)? else {
                writeln!(self.output)?;
                return Ok(());
            };
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    debug!("Running {command:?}");
                    if let Flow::Exit = self.execute(command)? {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn prompt_marker(&self) -> String {
        match self.manager.mode() {
            Mode::Create => "notes".to_string(),
            Mode::Edit(id) => format!("edit #{id}"),
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Load => {
                if let Ok(LoadOutcome::Applied { count }) = self.manager.load() {
                    writeln!(self.output, "Loaded {count} notes.")?;
                }
            }
            Command::List => self.print_list()?,
            Command::Search(query) => {
                self.manager.set_query(query);
                if !self.manager.visibility().search {
                    self.manager.toggle_search();
                }
                self.print_list()?;
            }
            Command::Toggle(Panel::Search) => self.manager.toggle_search(),
            Command::Toggle(Panel::Form) => self.manager.toggle_form(),
            Command::Toggle(Panel::List) => self.manager.toggle_list(),
            Command::New => {
                self.manager.cancel_edit();
                self.manager.toggle_form();
                writeln!(self.output, "New note. Set title, content and tags, then submit.")?;
            }
            Command::Title(title) => self.manager.draft_mut().title = title,
            Command::Content(content) => self.manager.draft_mut().content = content,
            Command::Tags(tags) => self.manager.draft_mut().tags = tags,
            Command::Date(date) => self.manager.draft_mut().date = date,
            Command::Draft => self.print_draft()?,
            Command::Edit(id) => {
                if self.manager.begin_edit(id).is_ok() {
                    self.print_draft()?;
                }
            }
            Command::Cancel => {
                self.manager.cancel_edit();
                writeln!(self.output, "Draft discarded.")?;
            }
            Command::Submit => match self.manager.submit() {
                Ok(SubmitOutcome::Created(id)) => writeln!(self.output, "Added note {id}.")?,
                Ok(SubmitOutcome::Updated(id)) => writeln!(self.output, "Updated note {id}.")?,
                Err(_) => {}
            },
            Command::Delete(id) => {
                let Self { manager, input, output, .. } = self;
                let outcome = manager.delete(id, |note| confirm_delete(input, output, note));
                match outcome {
                    Ok(DeleteOutcome::Deleted) => writeln!(self.output, "Deleted note {id}.")?,
                    Ok(DeleteOutcome::Cancelled) => writeln!(self.output, "Kept note {id}.")?,
                    Err(_) => {}
                }
            }
            Command::Contact => self.send_contact()?,
            Command::Logout => {
                match self.client.logout() {
                    Ok(_) => writeln!(self.output, "Logged out.")?,
                    Err(e) => writeln!(self.output, "! {}", e.user_message())?,
                }
                return Ok(Flow::Exit);
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => return Ok(Flow::Exit),
        }

        if let Some(notice) = self.manager.notice() {
            writeln!(self.output, "! {notice}")?;
            self.manager.clear_notice();
        }
        Ok(Flow::Continue)
    }

    fn print_list(&mut self) -> Result<()> {
        if !self.manager.visibility().list {
            writeln!(self.output, "(list hidden; `toggle list` to show)")?;
            return Ok(());
        }
        if self.manager.visibility().search && !self.manager.query().is_empty() {
            writeln!(self.output, "Search: {:?}", self.manager.query())?;
        }
        let visible = self.manager.visible_notes();
        if visible.is_empty() {
            writeln!(self.output, "No notes found.")?;
        }
        for note in visible {
            writeln!(self.output, "{}", render_note(note))?;
        }
        Ok(())
    }

    fn print_draft(&mut self) -> Result<()> {
        let heading = match self.manager.mode() {
            Mode::Create => "Add a New Note".to_string(),
            Mode::Edit(id) => format!("Edit Note {id}"),
        };
        let draft = self.manager.draft();
        writeln!(
            self.output,
            "{heading}\n  title:   {}\n  content: {}\n  tags:    {}\n  date:    {}",
            draft.title, draft.content, draft.tags, draft.date
        )?;
        Ok(())
    }

    fn send_contact(&mut self) -> Result<()> {
        let mut ask = |label: &str| -> Result<String> {
            write!(self.output, "{label}: ")?;
            self.output.flush()?;
            Ok(read_line(&mut self.input)?.unwrap_or_default())
        };
        let message = ContactMessage {
            name: ask("Name")?,
            email: ask("Email")?,
            subject: ask("Subject")?,
            message: ask("Message")?,
        };
        match self.client.send_contact(&message) {
            Ok(()) => writeln!(self.output, "Message sent successfully!")?,
            Err(e) => writeln!(self.output, "! Error sending message: {}", e.user_message())?,
        }
        Ok(())
    }
}

/// Reads one line without its terminator; `None` at end of input.
pub fn read_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn confirm_delete(input: &mut impl BufRead, output: &mut impl Write, note: &Note) -> bool {
    if write!(output, "Delete {:?}? [y/N] ", note.title)
        .and_then(|()| output.flush())
        .is_err()
    {
        return false;
    }
    matches!(
        read_line(input).ok().flatten().as_deref().map(str::trim),
        Some("y" | "Y" | "yes")
    )
}
