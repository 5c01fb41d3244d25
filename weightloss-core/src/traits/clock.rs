//! Wall clock

use alloc::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};

/// Source of local wall-clock time
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    /// Current local date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock handle shared by the screens that display or stamp time
pub type SharedClock = Rc<dyn Clock>;
