use crate::models::todo_model::Todo;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FormField {
    Name,
    Task,
}

/// Text typed into the add/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct TodoForm {
    pub name: String,
    pub task: String,
    pub focus: FormField,
}

impl Default for TodoForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            task: String::new(),
            focus: FormField::Name,
        }
    }
}

impl TodoForm {
    /// Both fields must hold something besides whitespace
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() && !self.task.trim().is_empty()
    }

    pub fn load(&mut self, todo: &Todo) {
        self.name = todo.name.clone();
        self.task = todo.task.clone();
        self.focus = FormField::Name;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Task,
            FormField::Task => FormField::Name,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Task => &mut self.task,
        }
    }
}

#[cfg(test)]
mod form_test {
    use super::*;

    #[test]
    fn test_typing_follows_focus() {
        let mut form = TodoForm::default();

        "milk".chars().for_each(|c| form.push(c));
        form.next_field();
        "1 gallon".chars().for_each(|c| form.push(c));
        form.pop();

        assert_eq!(form.name, "milk");
        assert_eq!(form.task, "1 gallo");
        assert_eq!(form.focus, FormField::Task);
    }

    #[test]
    fn test_whitespace_blocks_submit() {
        let mut form = TodoForm::default();
        assert!(!form.is_submittable());

        form.name = "  ".into();
        form.task = "x".into();
        assert!(!form.is_submittable());

        form.name = " a ".into();
        assert!(form.is_submittable());

        form.reset();
        assert_eq!(form, TodoForm::default());
    }
}
