use karaoke_lock::config::GateConfig;
use karaoke_lock::core::{ChannelId, UserId};
use karaoke_lock::gate::{Invocation, MemberSnapshot, StaticGuild};
use karaoke_lock::logging;
use karaoke_lock::service::KaraokeService;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "KARAOKE_LOCK_CONFIG";

/// Channel state to apply before the check runs
#[derive(Debug, Deserialize)]
struct ChannelState {
    id: ChannelId,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    admin: Option<UserId>,
}

/// One line of input: an invocation plus what the platform knows about the caller
///
/// Without `member` the caller is unknown to the platform and the check fails.
#[derive(Debug, Deserialize)]
struct DemoRequest {
    invocation: Invocation,
    #[serde(default)]
    member: Option<MemberSnapshot>,
    #[serde(default)]
    channel: Option<ChannelState>,
}

/// Handle one input line and build the JSON record to print
///
/// Blank lines yield `None`. Malformed lines and failed lookups yield an
/// `error` record so every request gets exactly one line back.
async fn handle_line(service: &KaraokeService, line: &str) -> Option<Value> {
    if line.trim().is_empty() {
        return None;
    }

    let request: DemoRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Skipping malformed request: {}", e);
            return Some(json!({ "error": e.to_string() }));
        }
    };

    if let Some(state) = &request.channel {
        let status = service.registry().get(state.id);
        match state.admin {
            Some(admin) => status.set_admin(admin),
            None => status.clear_admin(),
        }
        status.set_locked(state.locked);
    }

    let invocation = request.invocation;
    let mut guild = StaticGuild::new();
    if let Some(member) = request.member {
        guild.insert(invocation.guild, invocation.user, member);
    }

    let output = match service.check(&invocation, &guild).await {
        Ok(verdict) => json!({
            "user": invocation.user,
            "allowed": verdict.is_allowed(),
            "verdict": verdict,
            "message": verdict.deny_reason().map(|reason| reason.message()),
        }),
        Err(e) => json!({ "user": invocation.user, "error": e.to_string() }),
    };
    Some(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging system
    let _guard = logging::init_logging()?;

    tracing::info!("=== Karaoke Gate Starting ===");

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => GateConfig::from_json_file(path)?,
        Err(_) => GateConfig::default(),
    };
    let service = KaraokeService::new(config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(output) = handle_line(&service, &line).await {
            println!("{}", output);
        }
    }

    tracing::info!("=== Karaoke Gate Shutting Down ===");

    Ok(())
}
