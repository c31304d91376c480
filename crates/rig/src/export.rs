use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use crossbeam::channel::{self, Receiver, Sender};
use log::warn;

use rig_document::skeleton::SkeletonRecord;

use crate::error::Error;

/// Progress of a running batch export, one event per processed file.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    pub path: PathBuf,
    pub processed: usize,
    pub total: usize,
    pub percent: f32,
}

/// Cooperative stop signal for a batch export. Checked between files;
/// the file currently being written always completes.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub skipped: usize,
    pub cancelled: bool,
}

/// A batch export running on a worker thread.
///
/// Progress arrives lazily over the channel, a finite sequence that
/// ends when the worker does. Dropping the receiver does not stop the
/// export; `cancel` does, between files.
pub struct BatchExport {
    progress: Receiver<ExportProgress>,
    cancel: CancellationToken,
    worker: JoinHandle<Result<ExportSummary, Error>>,
}

impl BatchExport {
    pub fn progress(&self) -> &Receiver<ExportProgress> {
        &self.progress
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Blocks until the worker is done and returns its summary.
    pub fn wait(self) -> Result<ExportSummary, Error> {
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => Err(Error::Io(io::Error::other("Export worker panicked"))),
        }
    }
}

/// Exports every skeleton document found in `input_dir` to
/// `output_dir`, on a worker thread.
///
/// Each `.json` file is decoded, which validates it, and written back
/// out in normalized form; a malformed document is skipped with a
/// warning. The output directory is created on demand. Files are
/// processed in name order, one per progress event.
pub fn batch_export(
    input_dir: impl AsRef<Path>,
    output_dir: impl Into<PathBuf>,
) -> Result<BatchExport, Error> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(Error::NotADirectory(input_dir.to_owned()));
    }
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let output_dir = output_dir.into();
    let (sender, receiver) = channel::unbounded();
    let cancel = CancellationToken::default();
    let token = cancel.clone();
    let worker = thread::spawn(move || run(files, output_dir, token, sender));
    Ok(BatchExport {
        progress: receiver,
        cancel,
        worker,
    })
}

fn run(
    files: Vec<PathBuf>,
    output_dir: PathBuf,
    token: CancellationToken,
    progress: Sender<ExportProgress>,
) -> Result<ExportSummary, Error> {
    fs::create_dir_all(&output_dir)?;
    let total = files.len();
    let mut summary = ExportSummary::default();
    for (index, path) in files.into_iter().enumerate() {
        if token.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        match export_document(&path, &output_dir) {
            Ok(()) => summary.exported += 1,
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                summary.skipped += 1;
            }
        }
        let processed = index + 1;
        let event = ExportProgress {
            path,
            processed,
            total,
            percent: processed as f32 / total as f32 * 100.0,
        };
        // a dropped receiver is fine, the export keeps going
        let _ = progress.send(event);
    }
    Ok(summary)
}

fn export_document(path: &Path, output_dir: &Path) -> Result<(), Error> {
    let file = File::open(path)?;
    let record: SkeletonRecord = serde_json::from_reader(BufReader::new(file))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::MissingDocument(path.to_owned()))?;
    let out = File::create(output_dir.join(file_name))?;
    serde_json::to_writer_pretty(BufWriter::new(out), &record)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf};

    use crossbeam::channel;

    use crate::{error::Error, skeleton::Skeleton};

    use super::{batch_export, run, CancellationToken, ExportSummary};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rig-export-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_skeleton(dir: &PathBuf, name: &str) {
        Skeleton::new("char").save(dir.join(name)).unwrap();
    }

    #[test]
    fn missing_input_dir_is_rejected() {
        let result = batch_export("no/such/dir", "out");
        assert!(matches!(result, Err(Error::NotADirectory(_))));
    }

    #[test]
    fn exports_every_document_with_ascending_progress() {
        let input = temp_dir("in");
        let output = temp_dir("out");
        write_skeleton(&input, "a.json");
        write_skeleton(&input, "b.json");
        fs::write(input.join("notes.txt"), "not a document").unwrap();

        let export = batch_export(&input, &output).unwrap();
        let percents: Vec<f32> = export.progress().iter().map(|p| p.percent).collect();
        assert_eq!(percents, [50.0, 100.0]);
        let summary = export.wait().unwrap();
        assert_eq!(summary.exported, 2);
        assert_eq!(summary.skipped, 0);
        assert!(!summary.cancelled);
        assert!(output.join("a.json").exists());
        assert!(output.join("b.json").exists());
        assert!(!output.join("notes.txt").exists());
    }

    #[test]
    fn malformed_documents_are_skipped() {
        let input = temp_dir("bad-in");
        let output = temp_dir("bad-out");
        write_skeleton(&input, "good.json");
        fs::write(input.join("broken.json"), "{ not json").unwrap();

        let export = batch_export(&input, &output).unwrap();
        let summary = export.wait().unwrap();
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.skipped, 1);
        assert!(output.join("good.json").exists());
        assert!(!output.join("broken.json").exists());
    }

    #[test]
    fn cancelled_token_stops_before_the_first_file() {
        let input = temp_dir("cancel-in");
        let output = temp_dir("cancel-out");
        write_skeleton(&input, "a.json");

        let token = CancellationToken::default();
        token.cancel();
        let (sender, receiver) = channel::unbounded();
        let summary = run(
            vec![input.join("a.json")],
            output.clone(),
            token,
            sender,
        )
        .unwrap();
        assert_eq!(
            summary,
            ExportSummary {
                exported: 0,
                skipped: 0,
                cancelled: true,
            }
        );
        assert!(receiver.iter().next().is_none());
        assert!(!output.join("a.json").exists());
    }
}
