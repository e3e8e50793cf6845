//! View-scoped note state kept in step with the remote collection.

use log::{debug, info, warn};

use crate::{
    AuthContext, Mode, Note, NoteDraft, NoteId, NotekeeperError, NotesApi, Result, TagSplit,
};

/// Tunables for a [`NoteManager`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerOptions {
    /// How the draft's tag string is split on submit.
    pub tag_split: TagSplit,
}

/// Which panels are shown. Pure presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub search: bool,
    pub form: bool,
    pub list: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            search: false,
            form: false,
            list: true,
        }
    }
}

/// Sequence number handed out by [`NoteManager::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Position of this load among those the manager has issued, from 1.
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// What happened to a load response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cache now holds exactly the returned notes.
    Applied { count: usize },
    /// A later load was issued in the meantime; the response was dropped.
    Stale,
}

/// Which request a successful [`NoteManager::submit`] sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(NoteId),
    Updated(NoteId),
}

/// Result of [`NoteManager::delete`] when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
}

/// Owns the local mirror of the user's notes along with the draft, mode,
/// search query and panel visibility of the notes view.
///
/// The cache only changes after the service confirms a request. Creates and
/// edits are patched into the cache locally; [`load`](Self::load) is the only
/// full resync. Every failure is also kept as a user-facing
/// [`notice`](Self::notice) until the next operation starts.
pub struct NoteManager<A: NotesApi> {
    api: A,
    auth: AuthContext,
    options: ManagerOptions,
    cache: Vec<Note>,
    draft: NoteDraft,
    mode: Mode,
    query: String,
    visibility: Visibility,
    notice: Option<String>,
    issued_loads: u64,
}

impl<A: NotesApi> NoteManager<A> {
    /// A manager with an empty cache and default options.
    pub fn new(api: A, auth: AuthContext) -> Self {
        Self::with_options(api, auth, ManagerOptions::default())
    }

    /// Like [`new`](Self::new), with explicit tunables.
    pub fn with_options(api: A, auth: AuthContext, options: ManagerOptions) -> Self {
        Self {
            api,
            auth,
            options,
            cache: Vec::new(),
            draft: NoteDraft::default(),
            mode: Mode::Create,
            query: String::new(),
            visibility: Visibility::default(),
            notice: None,
            issued_loads: 0,
        }
    }

    /// The service this manager talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The session the manager was created for. Fixed for its lifetime.
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// The cached notes in fetch/creation order.
    pub fn notes(&self) -> &[Note] {
        &self.cache
    }

    /// Looks up a cached note by id.
    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.cache.iter().find(|n| n.id == id)
    }

    /// The note being composed.
    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Mutable access for filling in the form fields.
    pub fn draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.draft
    }

    /// Whether a submit creates a note or updates one.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The stored search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the search text used by [`visible_notes`](Self::visible_notes).
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Current panel flags.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Shows or hides the search panel.
    pub fn toggle_search(&mut self) {
        self.visibility.search = !self.visibility.search;
    }

    /// Shows or hides the note form.
    pub fn toggle_form(&mut self) {
        self.visibility.form = !self.visibility.form;
    }

    /// Shows or hides the note list.
    pub fn toggle_list(&mut self) {
        self.visibility.list = !self.visibility.list;
    }

    /// The last failure, phrased for the user.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Drops the notice once it has been shown.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Fetches the whole collection and replaces the cache with it.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::AuthRequired`] without contacting the
    /// service when the context is anonymous, or the transport/rejection
    /// error of the request. The cache is untouched on error.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let ticket = self.begin_load()?;
        let response = self.api.list_notes();
        self.finish_load(ticket, response)
    }

    /// Issues a new load sequence number. Any response belonging to an earlier
    /// ticket will be discarded by [`finish_load`](Self::finish_load).
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::AuthRequired`] when the context is anonymous.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        self.notice = None;
        if !self.auth.is_authenticated() {
            return self.surface(Err(NotekeeperError::AuthRequired));
        }
        self.issued_loads += 1;
        debug!("Issued load #{}", self.issued_loads);
        Ok(LoadTicket(self.issued_loads))
    }

    /// Applies the response for `ticket` if it is still the latest load.
    ///
    /// # Errors
    ///
    /// Returns the response's error when the ticket is current. Errors for
    /// stale tickets are dropped along with their responses.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        response: Result<Vec<Note>>,
    ) -> Result<LoadOutcome> {
        if ticket.seq() != self.issued_loads {
            warn!(
                "Discarding response for load #{} (latest is #{})",
                ticket.seq(),
                self.issued_loads
            );
            return Ok(LoadOutcome::Stale);
        }
        let notes = self.surface(response)?;
        let count = notes.len();
        self.cache = notes;
        info!("Loaded {count} notes");
        Ok(LoadOutcome::Applied { count })
    }

    /// Sends the draft as a create or an update, depending on the mode.
    ///
    /// On success the cache is patched, the mode returns to
    /// [`Mode::Create`], the draft is cleared and the form hidden. On failure
    /// cache, draft and mode are left as they were so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::Validation`] for a blank title or content
    /// (nothing is sent), or the request's error.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        self.notice = None;
        let payload = match self.draft.to_payload(self.options.tag_split) {
            Ok(payload) => payload,
            Err(e) => return self.surface(Err(e)),
        };

        let outcome = match self.mode {
            Mode::Create => {
                let id = self.surface(self.api.create_note(&payload))?;
                if let Some(existing) = self.cache.iter_mut().find(|n| n.id == id) {
                    warn!("Server reissued id {id}; replacing cached note");
                    existing.apply(payload);
                } else {
                    self.cache.push(Note::from_payload(id, payload));
                }
                info!("Created note {id}");
                SubmitOutcome::Created(id)
            }
            Mode::Edit(id) => {
                self.surface(self.api.update_note(id, &payload))?;
                match self.cache.iter_mut().find(|n| n.id == id) {
                    Some(note) => note.apply(payload),
                    None => warn!("Updated note {id} is no longer cached"),
                }
                info!("Updated note {id}");
                SubmitOutcome::Updated(id)
            }
        };

        self.reset_form();
        Ok(outcome)
    }

    /// Copies a cached note into the draft and switches to edit mode.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::NoteNotFound`] if `id` is not cached; state
    /// is unchanged.
    pub fn begin_edit(&mut self, id: NoteId) -> Result<()> {
        let Some(note) = self.get_note(id) else {
            return self.surface(Err(NotekeeperError::NoteNotFound(id)));
        };
        self.draft = NoteDraft::from_note(note);
        self.mode = Mode::Edit(id);
        self.visibility.form = true;
        debug!("Editing note {id}");
        Ok(())
    }

    /// Abandons the draft and returns to create mode.
    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Deletes a note after `confirm` agrees.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::NoteNotFound`] for an id that is not cached
    /// (nothing is sent), or the request's error. The cache is untouched on
    /// error.
    pub fn delete(
        &mut self,
        id: NoteId,
        confirm: impl FnOnce(&Note) -> bool,
    ) -> Result<DeleteOutcome> {
        self.notice = None;
        let Some(note) = self.get_note(id) else {
            return self.surface(Err(NotekeeperError::NoteNotFound(id)));
        };
        if !confirm(note) {
            debug!("Delete of note {id} declined");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.surface(self.api.delete_note(id))?;
        self.cache.retain(|n| n.id != id);
        if self.mode.target() == Some(id) {
            self.reset_form();
        }
        info!("Deleted note {id}");
        Ok(DeleteOutcome::Deleted)
    }

    /// Notes whose title or content contains `query`, ignoring case, in cache
    /// order. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Note> {
        let needle = query.to_lowercase();
        self.cache
            .iter()
            .filter(|n| n.matches_lowercase(&needle))
            .collect()
    }

    /// [`filter`](Self::filter) with the stored query.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.filter(&self.query)
    }

    fn reset_form(&mut self) {
        self.mode = Mode::Create;
        self.draft = NoteDraft::default();
        self.visibility.form = false;
    }

    fn surface<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!("{e}");
            self.notice = Some(e.user_message());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NotePayload, User};
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in for the notes service.
    #[derive(Default)]
    struct MemoryApi {
        notes: RefCell<Vec<Note>>,
        next_id: Cell<NoteId>,
        fail_with: Cell<Option<u16>>,
        calls: Cell<usize>,
        last_update: RefCell<Option<(NoteId, NotePayload)>>,
    }

    impl MemoryApi {
        fn seeded(notes: Vec<Note>) -> Self {
            let next = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
            let api = Self::default();
            *api.notes.borrow_mut() = notes;
            api.next_id.set(next);
            api
        }

        fn fail_next(&self, status: u16) {
            self.fail_with.set(Some(status));
        }

        fn call(&self) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            match self.fail_with.take() {
                Some(0) => Err(NotekeeperError::Transport("connection refused".to_string())),
                Some(status) => Err(NotekeeperError::RemoteRejection {
                    status,
                    message: Some("Failed to create note".to_string()),
                }),
                None => Ok(()),
            }
        }
    }

    impl NotesApi for MemoryApi {
        fn list_notes(&self) -> Result<Vec<Note>> {
            self.call()?;
            Ok(self.notes.borrow().clone())
        }

        fn create_note(&self, payload: &NotePayload) -> Result<NoteId> {
            self.call()?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.notes
                .borrow_mut()
                .push(Note::from_payload(id, payload.clone()));
            Ok(id)
        }

        fn update_note(&self, id: NoteId, payload: &NotePayload) -> Result<()> {
            self.call()?;
            *self.last_update.borrow_mut() = Some((id, payload.clone()));
            Ok(())
        }

        fn delete_note(&self, id: NoteId) -> Result<()> {
            self.call()?;
            self.notes.borrow_mut().retain(|n| n.id != id);
            Ok(())
        }
    }

    fn note(id: NoteId, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            tags: vec![],
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        }
    }

    fn logged_in() -> AuthContext {
        AuthContext::authenticated(User {
            id: 1,
            username: "ada".to_string(),
        })
    }

    fn loaded(notes: Vec<Note>) -> NoteManager<MemoryApi> {
        let mut manager = NoteManager::new(MemoryApi::seeded(notes), logged_in());
        manager.load().unwrap();
        manager
    }

    fn fill_draft(manager: &mut NoteManager<MemoryApi>, title: &str, content: &str, tags: &str) {
        let draft = manager.draft_mut();
        draft.title = title.to_string();
        draft.content = content.to_string();
        draft.tags = tags.to_string();
    }

    #[test]
    fn test_load_refused_when_anonymous() {
        let mut manager = NoteManager::new(MemoryApi::default(), AuthContext::anonymous());
        assert!(matches!(manager.load(), Err(NotekeeperError::AuthRequired)));
        assert_eq!(manager.api().calls.get(), 0);
        assert!(manager.notice().unwrap().contains("log in"));
    }

    #[test]
    fn test_load_replaces_cache_in_server_order() {
        let server = vec![note(3, "C", "c"), note(1, "A", "a"), note(2, "B", "b")];
        let mut manager = loaded(vec![note(9, "old", "stale")]);
        *manager.api().notes.borrow_mut() = server.clone();

        assert_eq!(manager.load().unwrap(), LoadOutcome::Applied { count: 3 });
        assert_eq!(manager.notes(), server.as_slice());
    }

    #[test]
    fn test_failed_load_keeps_cache_and_sets_notice() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        manager.api().fail_next(0);

        assert!(matches!(manager.load(), Err(NotekeeperError::Transport(_))));
        assert_eq!(manager.notes().len(), 1);
        assert!(manager.notice().is_some());

        manager.load().unwrap();
        assert!(manager.notice().is_none());
    }

    #[test]
    fn test_stale_load_response_is_discarded() {
        let mut manager = NoteManager::new(MemoryApi::default(), logged_in());
        let first = manager.begin_load().unwrap();
        let second = manager.begin_load().unwrap();
        assert!(second > first);
        assert_eq!((first.seq(), second.seq()), (1, 2));

        let outcome = manager.finish_load(second, Ok(vec![note(2, "new", "n")])).unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { count: 1 });

        let outcome = manager.finish_load(first, Ok(vec![note(1, "old", "o")])).unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(manager.notes()[0].id, 2);
    }

    #[test]
    fn test_stale_load_error_is_dropped() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        let first = manager.begin_load().unwrap();
        let _second = manager.begin_load().unwrap();

        let outcome = manager
            .finish_load(first, Err(NotekeeperError::Transport("late".to_string())))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(manager.notice().is_none());
        assert_eq!(manager.notes().len(), 1);
    }

    #[test]
    fn test_filter_matches_title_or_content_case_insensitively() {
        let manager = loaded(vec![
            note(1, "Shopping", "milk and EGGS"),
            note(2, "Work", "standup notes"),
            note(3, "eggs benedict", "recipe"),
        ]);

        let ids: Vec<NoteId> = manager.filter("Eggs").iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(manager.filter("nothing here").is_empty());
    }

    #[test]
    fn test_empty_filter_returns_whole_cache_in_order() {
        let manager = loaded(vec![note(2, "B", "b"), note(1, "A", "a")]);
        let all: Vec<&Note> = manager.notes().iter().collect();
        assert_eq!(manager.filter(""), all);
    }

    #[test]
    fn test_load_then_filter_scenario() {
        let manager = loaded(vec![note(1, "A", "foo")]);
        assert_eq!(manager.filter("foo"), vec![&note(1, "A", "foo")]);
        assert!(manager.filter("bar").is_empty());
    }

    #[test]
    fn test_visible_notes_uses_stored_query() {
        let mut manager = loaded(vec![note(1, "Alpha", "x"), note(2, "Beta", "y")]);
        manager.set_query("BET");
        let visible: Vec<NoteId> = manager.visible_notes().iter().map(|n| n.id).collect();
        assert_eq!(visible, vec![2]);
        assert_eq!(manager.notes().len(), 2);
    }

    #[test]
    fn test_create_appends_note_with_server_id() {
        let mut manager = loaded(vec![note(41, "Prior", "p")]);
        manager.toggle_form();
        fill_draft(&mut manager, "T", "C", "x,y");

        assert_eq!(manager.submit().unwrap(), SubmitOutcome::Created(42));

        let notes = manager.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], note(41, "Prior", "p"));
        assert_eq!(notes[1].id, 42);
        assert_eq!(notes[1].title, "T");
        assert_eq!(notes[1].content, "C");
        assert_eq!(notes[1].tags, vec!["x", "y"]);

        assert_eq!(manager.mode(), Mode::Create);
        assert_eq!(manager.draft().title, "");
        assert!(!manager.visibility().form);
    }

    #[test]
    fn test_edit_replaces_entry_in_place() {
        let mut manager = loaded(vec![note(1, "A", "a"), note(2, "B", "b"), note(3, "C", "c")]);
        manager.begin_edit(2).unwrap();
        assert_eq!(manager.mode(), Mode::Edit(2));
        assert!(manager.visibility().form);
        assert_eq!(manager.draft().title, "B");

        fill_draft(&mut manager, "B2", "b2", "work, urgent");
        assert_eq!(manager.submit().unwrap(), SubmitOutcome::Updated(2));

        let notes = manager.notes();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0], note(1, "A", "a"));
        assert_eq!(notes[2], note(3, "C", "c"));
        assert_eq!(notes[1].id, 2);
        assert_eq!(notes[1].title, "B2");
        assert_eq!(notes[1].tags, vec!["work", "urgent"]);

        let (sent_id, sent) = manager.api().last_update.borrow().clone().unwrap();
        assert_eq!(sent_id, 2);
        assert_eq!(sent.title, "B2");
        assert_eq!(manager.mode(), Mode::Create);
    }

    #[test]
    fn test_begin_edit_rejoins_tags() {
        let mut tagged = note(5, "T", "C");
        tagged.tags = vec!["a".to_string(), "b".to_string()];
        let mut manager = loaded(vec![tagged]);
        manager.begin_edit(5).unwrap();
        assert_eq!(manager.draft().tags, "a,b");
    }

    #[test]
    fn test_begin_edit_unknown_id_changes_nothing() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        fill_draft(&mut manager, "keep", "me", "");
        assert!(matches!(manager.begin_edit(99), Err(NotekeeperError::NoteNotFound(99))));
        assert_eq!(manager.mode(), Mode::Create);
        assert_eq!(manager.draft().title, "keep");
    }

    #[test]
    fn test_cancel_edit_returns_to_create() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        manager.begin_edit(1).unwrap();
        manager.cancel_edit();
        assert_eq!(manager.mode(), Mode::Create);
        assert_eq!(manager.draft().title, "");
        assert!(!manager.visibility().form);
    }

    #[test]
    fn test_failed_submit_keeps_cache_and_draft() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        manager.toggle_form();
        fill_draft(&mut manager, "T", "C", "x,y");
        let draft_before = manager.draft().clone();
        manager.api().fail_next(500);

        assert!(manager.submit().unwrap_err().is_status(500));
        assert_eq!(manager.notes(), &[note(1, "A", "a")]);
        assert_eq!(manager.draft(), &draft_before);
        assert!(manager.visibility().form);
        assert_eq!(manager.notice(), Some("Failed to create note"));
    }

    #[test]
    fn test_failed_edit_stays_in_edit_mode() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        manager.begin_edit(1).unwrap();
        manager.draft_mut().title = "changed".to_string();
        manager.api().fail_next(404);

        assert!(manager.submit().is_err());
        assert_eq!(manager.mode(), Mode::Edit(1));
        assert_eq!(manager.notes()[0].title, "A");
        assert_eq!(manager.draft().title, "changed");
    }

    #[test]
    fn test_submit_with_blank_fields_sends_nothing() {
        let mut manager = loaded(vec![]);
        let calls = manager.api().calls.get();
        fill_draft(&mut manager, "", "content", "");

        assert!(matches!(manager.submit(), Err(NotekeeperError::Validation(_))));
        assert_eq!(manager.api().calls.get(), calls);
        assert_eq!(manager.notice(), Some("Title is required"));
    }

    #[test]
    fn test_empty_tag_string_verbatim_policy() {
        let mut manager = loaded(vec![]);
        fill_draft(&mut manager, "T", "C", "");
        manager.submit().unwrap();
        assert_eq!(manager.notes()[0].tags, vec![String::new()]);
    }

    #[test]
    fn test_empty_tag_string_drop_empty_policy() {
        let options = ManagerOptions { tag_split: TagSplit::DropEmpty };
        let mut manager = NoteManager::with_options(MemoryApi::default(), logged_in(), options);
        manager.api().next_id.set(1);
        fill_draft(&mut manager, "T", "C", "");
        manager.submit().unwrap();
        assert!(manager.notes()[0].tags.is_empty());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut manager = loaded(vec![note(1, "A", "a"), note(2, "B", "b"), note(3, "C", "c")]);
        let outcome = manager.delete(2, |n| n.title == "B").unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        let ids: Vec<NoteId> = manager.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_declined_delete_sends_nothing() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        let calls = manager.api().calls.get();
        assert_eq!(manager.delete(1, |_| false).unwrap(), DeleteOutcome::Cancelled);
        assert_eq!(manager.api().calls.get(), calls);
        assert_eq!(manager.notes().len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_leaves_cache_intact() {
        let mut manager = loaded(vec![note(1, "A", "a"), note(2, "B", "b")]);
        let before = manager.notes().to_vec();
        assert!(matches!(
            manager.delete(7, |_| true),
            Err(NotekeeperError::NoteNotFound(7))
        ));
        assert_eq!(manager.notes(), before.as_slice());
    }

    #[test]
    fn test_failed_delete_keeps_note() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        manager.api().fail_next(500);
        assert!(manager.delete(1, |_| true).is_err());
        assert_eq!(manager.notes().len(), 1);
        assert!(manager.notice().is_some());
    }

    #[test]
    fn test_deleting_the_note_under_edit_resets_the_form() {
        let mut manager = loaded(vec![note(1, "A", "a")]);
        manager.begin_edit(1).unwrap();
        manager.delete(1, |_| true).unwrap();
        assert_eq!(manager.mode(), Mode::Create);
        assert!(!manager.visibility().form);
    }

    #[test]
    fn test_deleting_another_note_keeps_the_edit() {
        let mut manager = loaded(vec![note(1, "A", "a"), note(2, "B", "b")]);
        manager.begin_edit(1).unwrap();
        manager.delete(2, |_| true).unwrap();
        assert_eq!(manager.mode(), Mode::Edit(1));
        assert_eq!(manager.mode().target(), Some(1));
        assert!(manager.visibility().form);
    }

    #[test]
    fn test_visibility_flags_are_independent() {
        let mut manager = NoteManager::new(MemoryApi::default(), logged_in());
        assert_eq!(manager.visibility(), Visibility::default());
        manager.toggle_search();
        manager.toggle_list();
        let v = manager.visibility();
        assert!(v.search && !v.form && !v.list);
        assert_eq!(manager.mode(), Mode::Create);
    }
}
