// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `FileReader`-backed [`ImageEncoder`].

use std::cell::RefCell;
use std::rc::Rc;

use canopy_core::encode::{EncodeCallback, EncodeError, ImageEncoder};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{DomException, File, FileReader};

/// Reads a picked `File` as a data URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReaderEncoder;

impl ImageEncoder for FileReaderEncoder {
    type File = File;

    fn file_name(&self, file: &File) -> String {
        file.name()
    }

    fn encode(&self, file: File, done: EncodeCallback) {
        let reader = match FileReader::new() {
            Ok(reader) => reader,
            Err(_) => {
                done(Err(EncodeError::Read("FileReader unavailable".to_owned())));
                return;
            }
        };
        // Whichever of `loadend` or a synchronous throw comes first reports.
        let pending = Rc::new(RefCell::new(Some(done)));

        // `loadend` fires exactly once, after either `load` or `error`.
        let finished = reader.clone();
        let slot = pending.clone();
        let on_loadend = Closure::once(move || {
            let result = match finished.error() {
                Some(error) => Err(EncodeError::Read(error.message())),
                None => finished
                    .result()
                    .ok()
                    .and_then(|value| value.as_string())
                    .ok_or(EncodeError::NoResult),
            };
            report(&slot, result);
        });
        reader.set_onloadend(Some(on_loadend.as_ref().unchecked_ref()));
        match reader.read_as_data_url(&file) {
            Ok(()) => on_loadend.forget(),
            Err(err) => {
                reader.set_onloadend(None);
                let message = err
                    .dyn_ref::<DomException>()
                    .map(DomException::message)
                    .or_else(|| err.as_string())
                    .unwrap_or_else(|| "readAsDataURL threw".to_owned());
                warn!(%message, file = %file.name(), "could not start reading image");
                report(&pending, Err(EncodeError::Read(message)));
            }
        }
    }
}

/// Hand `result` to the callback unless it already ran.
fn report(slot: &RefCell<Option<EncodeCallback>>, result: Result<String, EncodeError>) {
    let done = slot.borrow_mut().take();
    if let Some(done) = done {
        done(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn start_failure_reports_once_and_loadend_is_ignored() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(RefCell::new(None));
        let (count, sink) = (calls.clone(), seen.clone());
        let slot: RefCell<Option<EncodeCallback>> = RefCell::new(Some(Box::new(move |result| {
            count.set(count.get() + 1);
            *sink.borrow_mut() = Some(result);
        })));

        report(&slot, Err(EncodeError::Read("InvalidStateError".into())));
        report(&slot, Ok("data:image/png,late".into()));

        assert_eq!(calls.get(), 1);
        assert_eq!(
            *seen.borrow(),
            Some(Err(EncodeError::Read("InvalidStateError".into())))
        );
    }
}
