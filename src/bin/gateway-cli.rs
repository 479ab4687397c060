use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Operator CLI for the VAIJÁ gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// Show which upstream settings are configured
    Env,
    /// Send a WhatsApp test message
    WhatsappTest {
        /// Destination, e.g. whatsapp:+5511999999999
        #[arg(long)]
        to: String,
        #[arg(long)]
        msg: Option<String>,
    },
    /// Create a delivery
    CreateDelivery {
        #[arg(long, allow_hyphen_values = true)]
        origin_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        origin_lng: f64,
        #[arg(long, allow_hyphen_values = true)]
        dest_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        dest_lng: f64,
        #[arg(long)]
        price: Option<f64>,
    },
    /// Mark a delivery as accepted by a driver
    AcceptDriver {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        plate: Option<String>,
        #[arg(long)]
        vehicle: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Health => client.get(format!("{}/healthz", base)),
        Commands::Env => client.get(format!("{}/env", base)),
        Commands::WhatsappTest { to, msg } => {
            let mut query = vec![("to", to)];
            if let Some(msg) = msg {
                query.push(("msg", msg));
            }
            client.get(format!("{}/whatsapp/test", base)).query(&query)
        }
        Commands::CreateDelivery {
            origin_lat,
            origin_lng,
            dest_lat,
            dest_lng,
            price,
        } => client.post(format!("{}/criar-entrega", base)).json(&json!({
            "origem": { "lat": origin_lat, "lng": origin_lng },
            "destino": { "lat": dest_lat, "lng": dest_lng },
            "preco": price,
        })),
        Commands::AcceptDriver {
            id,
            name,
            plate,
            vehicle,
            phone,
        } => client.post(format!("{}/aceitar-motorista", base)).json(&json!({
            "entregaId": id,
            "driver": { "nome": name, "placa": plate, "veiculo": vehicle, "fone": phone },
        })),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
