//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`,
//! serves `static/` over HTTP, and optionally exposes it via ngrok.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::{Child, Command, Stdio};
    use std::{thread, time::Duration};

    use anyhow::{bail, Context};
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(about = "Build and serve the water ripple page locally")]
    pub struct Cli {
        /// Port for the local HTTP server.
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Serve whatever is already in `static/pkg`.
        #[arg(long)]
        skip_build: bool,

        /// Expose the server through an ngrok tunnel.
        #[arg(long)]
        tunnel: bool,
    }

    pub fn run(cli: Cli) -> anyhow::Result<()> {
        if !cli.skip_build {
            build_pkg()?;
        }

        println!("Launching local server at http://127.0.0.1:{} …", cli.port);
        let mut server = Spawned::new(
            Command::new("python3")
                .args(["-m", "http.server", &cli.port.to_string(), "--directory", "static"])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .context("failed to start http server (is python3 installed?)")?,
        );

        // dropped (and killed) on every exit path
        let _tunnel = if cli.tunnel {
            match Command::new("ngrok")
                .args(["http", &cli.port.to_string()])
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .spawn()
            {
                Ok(child) => {
                    println!("ngrok tunnel starting …");
                    Some(Spawned::new(child))
                }
                Err(_) => {
                    eprintln!("ngrok not found. Install it to expose the site over the internet.");
                    None
                }
            }
        } else {
            None
        };

        loop {
            if let Some(status) = server.child.try_wait().context("failed to poll http server")? {
                bail!("http server exited: {status}");
            }
            thread::sleep(Duration::from_secs(1));
        }
    }

    /// Child process that is killed when this handle goes away.
    struct Spawned {
        child: Child,
    }

    impl Spawned {
        fn new(child: Child) -> Self {
            Self { child }
        }

        fn shutdown(&mut self) {
            if let Ok(None) = self.child.try_wait() {
                let _ = self.child.kill();
                let _ = self.child.wait();
            }
        }
    }

    impl Drop for Spawned {
        fn drop(&mut self) {
            self.shutdown();
        }
    }

    fn build_pkg() -> anyhow::Result<()> {
        println!("Building WASM pkg …");
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
            .context("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/)")?;
        if !status.success() {
            bail!("wasm-pack finished with {status}");
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    host::run(host::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
