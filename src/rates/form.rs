use crate::core::rate::Rate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit,
}

/// Working copy of a single rate while it is being created or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct RateForm {
    code: String,
    value: Option<f64>,
    mode: FormMode,
}

impl RateForm {
    /// An empty form for a new rate.
    pub fn create() -> Self {
        Self {
            code: String::new(),
            value: None,
            mode: FormMode::Create,
        }
    }

    /// A form editing `rate`. Fields are only copied over when the rate has a code.
    pub fn edit(rate: &Rate) -> Self {
        let mut form = Self {
            mode: FormMode::Edit,
            ..Self::create()
        };
        if !rate.code.is_empty() {
            form.code = rate.code.clone();
            form.value = rate.value;
        }
        form
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
    }

    pub fn is_edit(&self) -> bool {
        self.mode == FormMode::Edit
    }

    pub fn is_valid(&self) -> bool {
        !self.code.is_empty() && self.value.is_some()
    }

    /// The staged rate, or `None` while the code is empty or the value unset.
    pub fn commit(&self) -> Option<Rate> {
        self.is_valid()
            .then(|| Rate::new(self.code.clone(), self.value))
    }

    /// Clears both fields. The mode is kept.
    pub fn reset(&mut self) {
        self.code.clear();
        self.value = None;
    }
}
