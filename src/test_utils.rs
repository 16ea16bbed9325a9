use crate::models::domain::McqRecord;

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Creates a standard four-option record
    pub fn test_record(question: &str) -> McqRecord {
        McqRecord::new(question, &["A one", "B two", "C three", "D four"], 0)
    }

    /// Five records, three of which mention Lagos in differing case
    pub fn lagos_records() -> Vec<McqRecord> {
        vec![
            test_record("Which state is Lagos located in?"),
            test_record("What is the capital of Ghana?"),
            test_record("What lagoon borders LAGOS island?"),
            test_record("Who wrote Things Fall Apart?"),
            test_record("When did Lagos stop being the capital?"),
        ]
    }

    /// Builds an in-memory PDF with one Courier text line per page
    pub fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("content encodes"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf saves to memory");
        bytes
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;
    use std::sync::Mutex;

    use crate::services::generation_orchestrator::ProgressReporter;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }

    /// Reporter that remembers everything it was told
    #[derive(Default)]
    pub struct RecordingReporter {
        progress: Mutex<Vec<(usize, usize)>>,
        warnings: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        pub fn progress_events(&self) -> Vec<(usize, usize)> {
            self.progress.lock().expect("progress lock").clone()
        }

        pub fn warnings(&self) -> Vec<String> {
            self.warnings.lock().expect("warnings lock").clone()
        }
    }

    impl ProgressReporter for RecordingReporter {
        fn progress(&self, completed: usize, total: usize) {
            self.progress
                .lock()
                .expect("progress lock")
                .push((completed, total));
        }

        fn warn(&self, message: String) {
            self.warnings.lock().expect("warnings lock").push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_lagos_records() {
        let records = lagos_records();
        assert_eq!(records.len(), 5);
        assert_eq!(
            records
                .iter()
                .filter(|r| r.question.to_lowercase().contains("lagos"))
                .count(),
            3
        );
    }

    #[test]
    fn test_fixtures_pdf_has_header() {
        let bytes = pdf_with_pages(&["hello"]);
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }
}
