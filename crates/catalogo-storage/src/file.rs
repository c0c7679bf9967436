use crate::mem::InMemoryStore;
use crate::traits::UserStore;
use catalogo_core::{CatalogError, InsertAck, Result, StoredUser, UserRecord};
use parking_lot::Mutex;
use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub const COLLECTION_FILE: &str = "usuarios.jsonl";

/// Append-only collection: one JSON document per line.
pub struct FileStore {
    mem: InMemoryStore,
    file: Mutex<File>,
    path: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| CatalogError::io(dir, e))?;
        let path = dir.join(COLLECTION_FILE);
        let mem = InMemoryStore::new();
        for doc in read_collection(dir)? {
            mem.replay(doc);
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| CatalogError::io(&path, e))?;
        terminate_last_line(&mut file).map_err(|e| CatalogError::io(&path, e))?;
        debug!(path = %path.display(), documents = mem.len(), "user collection opened");
        Ok(Self {
            mem,
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads every parseable document of the collection under `dir`.
/// A missing collection file is an empty collection.
pub fn read_collection(dir: &Path) -> Result<Vec<StoredUser>> {
    let path = dir.join(COLLECTION_FILE);
    let fh = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CatalogError::io(&path, e)),
    };
    let mut out = Vec::new();
    for (n, line) in BufReader::new(fh).lines().enumerate() {
        let line = line.map_err(|e| CatalogError::io(&path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<StoredUser>(&line) {
            Ok(doc) => out.push(doc),
            Err(e) => warn!(path = %path.display(), line = n + 1, "skipping bad document: {}", e),
        }
    }
    Ok(out)
}

/// An interrupted append can leave a partial last line; close it so the next
/// document starts on a line of its own.
fn terminate_last_line(file: &mut File) -> std::io::Result<()> {
    if file.metadata()?.len() == 0 {
        return Ok(());
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        warn!("collection ends in a partial line, terminating it");
        append_line(file, b"\n")?;
    }
    Ok(())
}

fn append_line(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    file.write_all(line)?;
    file.flush()
}

#[async_trait::async_trait]
impl UserStore for FileStore {
    async fn insert(&self, user: UserRecord) -> Result<InsertAck> {
        let doc = StoredUser::new(user);
        let mut line = serde_json::to_vec(&doc).map_err(|e| CatalogError::Store(e.to_string()))?;
        line.push(b'\n');
        let ack = InsertAck::for_user(&doc);
        // memory order follows file order
        let mut file = self.file.lock();
        append_line(&mut file, &line)
            .map_err(|e| CatalogError::Store(format!("{}: {}", self.path.display(), e)))?;
        self.mem.replay(doc);
        Ok(ack)
    }

    async fn all(&self) -> Result<Vec<StoredUser>> {
        self.mem.all().await
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
