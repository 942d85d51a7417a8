use std::cell::RefCell;
use std::rc::Rc;

/// Shared execution log the task closures append to.
pub type RunLog = Rc<RefCell<Vec<String>>>;

pub fn recorder() -> RunLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A parameterless task body that records its own name when run.
pub fn record(log: &RunLog, name: &str) -> impl Fn() + 'static {
    let log = Rc::clone(log);
    let name = name.to_string();
    move || log.borrow_mut().push(name.clone())
}
