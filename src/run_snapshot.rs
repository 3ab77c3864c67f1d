use crate::archiver::Archiver;
use crate::console::CredentialPrompt;
use crate::domain::Snapshot;
use crate::domain::credentials::AccessToken;
use crate::domain::device::Device;
use crate::domain::thermostat_api::ThermostatApi;
use crate::presenter::render_table;
use chrono::Local;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub logged_in: bool,
    pub devices: usize,
    pub archived: Vec<PathBuf>,
}

/// Logs in, then prints and archives the snapshot of every thermostat on the account, one device
/// at a time. API and file system failures are reported on `out` and never abort the run; only
/// failing to write to `out` does.
#[instrument(skip_all)]
pub async fn run_snapshot(
    api: &dyn ThermostatApi,
    prompt: &mut dyn CredentialPrompt,
    archiver: &Archiver,
    out: &mut dyn Write,
) -> io::Result<RunSummary> {
    writeln!(out, "\n--- Amana/Daikin Skyport Snapshot Tool ---")?;
    out.flush()?;

    let Some(token) = authenticate(api, prompt, out).await? else {
        return Ok(RunSummary::default());
    };

    let devices = list_devices(api, &token, out).await?;
    let mut summary = RunSummary {
        logged_in: true,
        devices: devices.len(),
        archived: Vec::new(),
    };

    for device in &devices {
        let snapshot = fetch_device_data(api, &token, device, out).await?;
        write!(out, "{}", render_table(&device.name, &snapshot))?;

        match archiver.archive(&device.name, &snapshot, &Local::now()).await {
            Ok(path) => {
                writeln!(out, "[+] Full raw data saved to: {}", path.display())?;
                summary.archived.push(path);
            }
            Err(e) => {
                debug!(device_id = device.id, "Unable to archive the snapshot: {:?}", e);
                writeln!(out, "[!] Failed to save raw dump: {}", e)?;
            }
        }
    }

    Ok(summary)
}

/// Returns `None` when no token could be obtained, after telling the user why.
async fn authenticate(
    api: &dyn ThermostatApi,
    prompt: &mut dyn CredentialPrompt,
    out: &mut dyn Write,
) -> io::Result<Option<AccessToken>> {
    let credentials = match prompt.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            writeln!(out, "[!] Login failed: {}", e)?;
            return Ok(None);
        }
    };

    writeln!(out, "\n[-] Attempting to log in as {}...", credentials.email())?;
    match api.login(&credentials).await {
        Ok(token) => {
            writeln!(out, "[+] Login successful!")?;
            Ok(Some(token))
        }
        Err(e) => {
            debug!("Login failed: {:?}", e);
            writeln!(out, "[!] Login failed: {}", e)?;
            Ok(None)
        }
    }
}

// An empty inventory and a failed request look the same to the caller.
async fn list_devices(api: &dyn ThermostatApi, token: &AccessToken, out: &mut dyn Write) -> io::Result<Vec<Device>> {
    match api.devices(token).await {
        Ok(devices) => {
            writeln!(out, "[+] Found {} device(s).", devices.len())?;
            for device in &devices {
                info!(
                    device_id = device.id,
                    model = ?device.model,
                    firmware_version = ?device.firmware_version,
                    "Found device '{}'",
                    device.name
                );
            }
            Ok(devices)
        }
        Err(e) => {
            debug!("Failed to get devices: {:?}", e);
            writeln!(out, "[!] Failed to get devices: {}", e)?;
            Ok(Vec::new())
        }
    }
}

async fn fetch_device_data(
    api: &dyn ThermostatApi,
    token: &AccessToken,
    device: &Device,
    out: &mut dyn Write,
) -> io::Result<Snapshot> {
    writeln!(out, "\n[-] Fetching data for {}...", device.name)?;

    match api.device_data(token, &device.id).await {
        Ok(snapshot) => {
            if snapshot.is_empty() {
                debug!(device_id = device.id, "The API returned an empty document");
            }
            Ok(snapshot)
        }
        Err(e) => {
            debug!(device_id = device.id, "Failed to get device data: {:?}", e);
            writeln!(out, "[!] Failed to get device data: {}", e)?;
            Ok(Snapshot::new())
        }
    }
}
