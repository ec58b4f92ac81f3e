use crate::model::task::{Priority, Task, TaskDraft, TaskId, parse_due_date};

/// State of the task view: the sorted list plus the busy and error flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Always in display order (see `ops::sort`)
    pub tasks: Vec<Task>,
    /// True while a request is in flight; gates every interactive control
    pub loading: bool,
    /// Message of the most recent failed operation
    pub error: Option<String>,
}

impl ViewState {
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }
}

/// Fields of the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    DueDate,
    Priority,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::DueDate,
        FormField::Priority,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::DueDate => "Due Date",
            FormField::Priority => "Priority",
        }
    }

    pub fn next(self) -> FormField {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::DueDate,
            FormField::DueDate => FormField::Priority,
            FormField::Priority => FormField::Title,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::DueDate => FormField::Description,
            FormField::Priority => FormField::DueDate,
        }
    }
}

/// The create form. Priority is the raw select value ("" until chosen).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
}

impl FormState {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::DueDate => &self.due_date,
            FormField::Priority => &self.priority,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::DueDate => &mut self.due_date,
            FormField::Priority => &mut self.priority,
        }
    }

    /// First field that fails its input constraint, if any
    pub fn first_invalid(&self) -> Option<FormField> {
        FormField::ALL.into_iter().find(|&field| {
            let value = self.value(field);
            match field {
                FormField::Title | FormField::Description => value.is_empty(),
                FormField::DueDate => parse_due_date(value).is_none(),
                FormField::Priority => Priority::from_choice(value).is_none(),
            }
        })
    }

    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date.clone(),
            priority: Priority::from(self.priority.clone()),
        }
    }

    /// Step the priority select through Low/Medium/High
    pub fn cycle_priority(&mut self, forward: bool) {
        let choices = Priority::CHOICES;
        let current = choices.iter().position(|p| p.as_str() == self.priority);
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => choices.len() - 1,
            (Some(i), true) => (i + 1) % choices.len(),
            (Some(i), false) => (i + choices.len() - 1) % choices.len(),
        };
        self.priority = choices[next].as_str().to_string();
    }

    pub fn reset(&mut self) {
        *self = FormState::default();
    }
}
