//! Server orchestration: load, bind, run both lines, tear down

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use hbc_core::hbc_core_types::schema::OP_LOAD_COLLECTION;
use hbc_core::{
    log_op_end, log_op_error, log_op_start, CollectionOfHumanBeings, CollectionStore,
    ExecutionContext, Invoker, Result, SharedCollection, ShutdownSignal,
};

use crate::config::ServerConfig;
use crate::console::{run_console_line, TerminalConsole};
use crate::transport::UdpEndpoint;

/// A bound server ready to run its lines
pub struct Server {
    invoker: Arc<Invoker>,
    endpoint: UdpEndpoint,
}

impl Server {
    /// Load the collection, build the invoker and bind the socket
    ///
    /// A corrupt data file is reported and the server starts empty.
    ///
    /// # Errors
    ///
    /// Returns `TransportSetup` if the socket cannot be bound.
    pub async fn start(config: &ServerConfig, port: u16) -> Result<Self> {
        let store = CollectionStore::new(&config.data_file);
        let collection = match load_collection(&store) {
            Ok(collection) => collection,
            Err(err) => {
                eprintln!("{err}");
                CollectionOfHumanBeings::new()
            }
        };
        let context = ExecutionContext {
            collection: SharedCollection::new(collection),
            shutdown: ShutdownSignal::new(),
            store,
        };
        let invoker = Arc::new(Invoker::with_builtin_commands(context));
        let endpoint = UdpEndpoint::bind(&config.host, port).await?;
        Ok(Self { invoker, endpoint })
    }

    pub fn invoker(&self) -> &Arc<Invoker> {
        &self.invoker
    }

    pub fn endpoint(&self) -> &UdpEndpoint {
        &self.endpoint
    }

    pub fn shutdown(&self) -> &ShutdownSignal {
        &self.invoker.context().shutdown
    }

    /// Run the console line on stdin and the network line until shutdown
    ///
    /// Ctrl-C triggers the same shutdown as `exit`. The socket is closed
    /// when this returns.
    pub async fn run(self) {
        let shutdown = self.shutdown().clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received");
                shutdown.trigger();
            }
        });

        let console_invoker = Arc::clone(&self.invoker);
        let console_line = thread::spawn(move || {
            let mut console = TerminalConsole::new(io::stdin().lock(), io::stdout(), io::stderr());
            run_console_line(&console_invoker, &mut console);
        });

        println!("Server is listening on {}", self.endpoint.local_addr());
        self.endpoint
            .serve(Arc::clone(&self.invoker), self.shutdown().clone())
            .await;

        // A console blocked on stdin cannot be interrupted; leave it to exit
        if console_line.is_finished() {
            if console_line.join().is_err() {
                tracing::error!("console line panicked");
            }
        } else {
            tracing::debug!("console line still waiting for input");
        }
        tracing::info!("server stopped");
    }
}

/// Read the collection from `store`, empty when the file does not exist
///
/// # Errors
///
/// Returns `Persistence` for unreadable or corrupt files.
pub fn load_collection(store: &CollectionStore) -> Result<CollectionOfHumanBeings> {
    log_op_start!(OP_LOAD_COLLECTION, path = %store.path().display());
    let start = Instant::now();
    match store.load() {
        Ok(loaded) => {
            let collection = loaded.unwrap_or_default();
            log_op_end!(
                OP_LOAD_COLLECTION,
                duration_ms = start.elapsed().as_millis() as u64,
                elements = collection.len() as u64
            );
            Ok(collection)
        }
        Err(err) => {
            log_op_error!(
                OP_LOAD_COLLECTION,
                err,
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}
