#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Input {
    pub value: String,
    pub rect: Rect,
    pub date_picker: bool,
    pub read_only: bool,
    pub wrapped: bool,
}

impl Input {
    pub fn new(value: impl Into<String>, rect: Rect) -> Self {
        Self {
            value: value.into(),
            rect,
            date_picker: false,
            read_only: false,
            wrapped: false,
        }
    }

    pub fn with_date_picker(mut self) -> Self {
        self.date_picker = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub input: InputId,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct Page {
    inputs: Vec<Input>,
    changes: Vec<ValueChange>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&mut self, input: Input) -> InputId {
        self.inputs.push(input);
        InputId(self.inputs.len() - 1)
    }

    pub fn input(&self, id: InputId) -> Option<&Input> {
        self.inputs.get(id.0)
    }

    pub fn input_mut(&mut self, id: InputId) -> Option<&mut Input> {
        self.inputs.get_mut(id.0)
    }

    pub fn input_ids(&self) -> Vec<InputId> {
        (0..self.inputs.len()).map(InputId).collect()
    }

    /// Programmatic write; enqueues no change notification.
    pub fn set_value(&mut self, id: InputId, value: impl Into<String>) {
        if let Some(input) = self.inputs.get_mut(id.0) {
            input.value = value.into();
        }
    }

    /// User-driven write; enqueues exactly one change notification.
    pub(crate) fn commit_value(&mut self, id: InputId, value: String) {
        if let Some(input) = self.inputs.get_mut(id.0) {
            input.value = value.clone();
            self.changes.push(ValueChange { input: id, value });
        }
    }

    pub fn take_changes(&mut self) -> Vec<ValueChange> {
        std::mem::take(&mut self.changes)
    }
}
