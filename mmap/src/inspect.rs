use layout::{SectionMap, SymbolTable};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::{config::Config, error::Error, outcome::Outcome};

/// Source of raw symbol and section dumps for a kernel binary.
pub trait Inspector {
    /// Text in the shape of `nm <binary>`.
    fn symbol_dump(&self, binary: &Path) -> Result<String, Error>;
    /// Text in the shape of `objdump -h <binary>`.
    fn section_dump(&self, binary: &Path) -> Result<String, Error>;
}

pub fn read_symbols<I: Inspector + ?Sized>(inspector: &I, binary: &Path) -> Outcome<SymbolTable> {
    match inspector.symbol_dump(binary) {
        Ok(text) => Outcome::found(SymbolTable::parse(&text)),
        Err(err) => Outcome::failed(err),
    }
}

pub fn read_sections<I: Inspector + ?Sized>(inspector: &I, binary: &Path) -> Outcome<SectionMap> {
    match inspector.section_dump(binary) {
        Ok(text) => Outcome::found(SectionMap::parse(&text)),
        Err(err) => Outcome::failed(err),
    }
}

// ----------------------------------------------------------------------------
// Host binutils

#[derive(Debug, Clone)]
pub struct Tools {
    nm: String,
    objdump: String,
    timeout: Option<Duration>,
}

impl Tools {
    pub fn new(config: &Config) -> Self {
        Tools {
            nm: config.nm.clone(),
            objdump: config.objdump.clone(),
            timeout: config.tool_timeout.map(Duration::from_secs),
        }
    }

    fn run(&self, program: &str, args: &[&str], binary: &Path) -> Result<String, Error> {
        if !binary.exists() {
            return Err(Error::MissingInput(binary.display().to_string()));
        }
        let mut words = vec![program.to_string()];
        words.extend(args.iter().map(|a| a.to_string()));
        words.push(binary.display().to_string());
        let label = words.join(" ");

        let mut child = Command::new(program)
            .args(args)
            .arg(binary)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::ToolSpawn(label.clone(), e))?;

        // Drain both pipes on their own threads so a large dump cannot fill
        // the pipe and stall the child while we wait on it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child, &label)?;
        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            let reason = stderr.lines().next().unwrap_or("").trim().to_string();
            return Err(Error::ToolFailed(label, status, reason));
        }
        Ok(stdout)
    }

    fn wait(&self, child: &mut Child, label: &str) -> Result<ExitStatus, Error> {
        let Some(timeout) = self.timeout else {
            return child
                .wait()
                .map_err(|e| Error::ToolSpawn(label.to_string(), e));
        };
        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::ToolTimeout(label.to_string(), timeout.as_secs()));
                }
                Ok(None) => thread::sleep(Duration::from_millis(10)),
                Err(e) => return Err(Error::ToolSpawn(label.to_string(), e)),
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = vec![];
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

impl Inspector for Tools {
    fn symbol_dump(&self, binary: &Path) -> Result<String, Error> {
        self.run(&self.nm, &[], binary)
    }

    fn section_dump(&self, binary: &Path) -> Result<String, Error> {
        self.run(&self.objdump, &["-h"], binary)
    }
}

// ----------------------------------------------------------------------------
// Canned dumps

/// Fixed dump text, for running the pipeline without binutils.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub symbols: String,
    pub sections: String,
}

impl Fixture {
    pub fn new(symbols: &str, sections: &str) -> Self {
        Fixture {
            symbols: symbols.to_string(),
            sections: sections.to_string(),
        }
    }
}

impl Inspector for Fixture {
    fn symbol_dump(&self, _binary: &Path) -> Result<String, Error> {
        Ok(self.symbols.clone())
    }

    fn section_dump(&self, _binary: &Path) -> Result<String, Error> {
        Ok(self.sections.clone())
    }
}
