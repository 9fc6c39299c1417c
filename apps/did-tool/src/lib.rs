//! Inspect and convert DIDs from the command line.

use std::{fmt::Write as _, str::FromStr};

use color_eyre::eyre::{bail, OptionExt as _, WrapErr as _};
use did_codec::{
	host::Host,
	methods::plc::{DidPlc, PlcIdPolicy},
	Did as _, DidDyn, DidKey, DidWeb, KeyAlgo,
};
use tracing::{debug, info};
use url::Url;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
	/// Parses a DID and prints its structure.
	Inspect {
		did: String,
		/// Only accept did:plc identifiers of the length issued by the plc
		/// directory.
		#[clap(long, env = "DID_TOOL_CANONICAL_PLC")]
		canonical_plc: bool,
		/// Print the result as json.
		#[clap(long)]
		json: bool,
	},
	/// Prints the https url that a did:web's document is served at.
	ResolutionUrl { did: String },
	/// Creates a did:web from an https url.
	FromUrl { url: Url },
	/// Creates a did:key from a hex encoded public key.
	FromKey {
		#[clap(long, default_value = "ed25519")]
		algo: KeyAlgo,
		#[clap(value_name = "HEX")]
		public_key: String,
	},
}

impl Commands {
	/// Runs the command, returning what should be printed.
	pub fn run(self) -> color_eyre::Result<String> {
		match self {
			Self::Inspect {
				did,
				canonical_plc,
				json,
			} => {
				let parsed = DidDyn::from_str(&did)
					.wrap_err_with(|| format!("failed to parse {did:?}"))?;
				if canonical_plc {
					if let Some(plc) = parsed.as_plc() {
						DidPlc::parse_with_policy(
							&plc.to_string(),
							&PlcIdPolicy::CANONICAL,
						)
						.wrap_err("did:plc is not canonical")?;
					}
				}
				info!(method = %parsed.method(), "parsed did");
				if json {
					inspect_json(&parsed)
				} else {
					inspect(&parsed).wrap_err("failed to format did")
				}
			}
			Self::ResolutionUrl { did } => {
				let parsed = DidDyn::from_str(&did)
					.wrap_err_with(|| format!("failed to parse {did:?}"))?;
				let web = parsed
					.as_web()
					.ok_or_eyre("only did:web has a resolution url")?;
				Ok(web.to_resolution_url())
			}
			Self::FromUrl { url } => {
				let did = DidWeb::from_url(&url)
					.wrap_err_with(|| format!("failed to convert {url}"))?;
				Ok(did.to_string())
			}
			Self::FromKey { algo, public_key } => {
				let bytes = hex::decode(public_key.trim())
					.wrap_err("public key is not valid hex")?;
				debug!(%algo, len = bytes.len(), "decoded public key");
				let did = DidKey::from_pub_key(algo, bytes)?;
				Ok(did.to_string())
			}
		}
	}
}

fn inspect(did: &DidDyn) -> Result<String, std::fmt::Error> {
	let mut out = String::new();
	writeln!(out, "did: {did}")?;
	writeln!(out, "method: {}", did.method())?;
	match did {
		DidDyn::Key(key) => {
			writeln!(out, "algorithm: {}", key.key_algo())?;
			writeln!(out, "public key: {}", hex::encode(key.pub_key()))?;
		}
		DidDyn::Plc(plc) => {
			writeln!(out, "identifier: {}", plc.identifier())?;
		}
		DidDyn::Web(web) => {
			let kind = match web.host() {
				Host::Domain(_) => "domain",
				Host::Hostname(_) => "hostname",
			};
			writeln!(out, "host: {} ({kind})", web.host())?;
			if let Some(port) = web.port() {
				writeln!(out, "port: {port}")?;
			}
			writeln!(out, "path: {:?}", web.path())?;
			writeln!(out, "resolution url: {}", web.to_resolution_url())?;
		}
		_ => (),
	}
	out.truncate(out.trim_end().len());
	Ok(out)
}

fn inspect_json(did: &DidDyn) -> color_eyre::Result<String> {
	let mut value = serde_json::json!({
		"did": did,
		"method": did.method().as_str(),
	});
	match did {
		DidDyn::Key(key) => {
			value["algorithm"] = key.key_algo().name().into();
			value["publicKey"] = hex::encode(key.pub_key()).into();
		}
		DidDyn::Plc(plc) => {
			value["identifier"] = plc.identifier().into();
		}
		DidDyn::Web(web) => {
			value["host"] = web.host().to_string().into();
			value["port"] = web.port().into();
			value["path"] = web.path().into();
			value["resolutionUrl"] = web.to_resolution_url().into();
		}
		_ => bail!("unknown did method"),
	}
	serde_json::to_string_pretty(&value).wrap_err("failed to serialize json")
}

#[cfg(test)]
mod test {
	use clap::Parser as _;

	use super::*;

	fn run(args: &[&str]) -> color_eyre::Result<String> {
		let args = std::iter::once("did-tool").chain(args.iter().copied());
		let cli = Cli::try_parse_from(args)?;
		cli.command.run()
	}

	#[test]
	fn test_inspect_web() -> color_eyre::Result<()> {
		let out = run(&["inspect", "did:web:localhost%3A8080:users"])?;
		assert_eq!(
			out,
			"did: did:web:localhost%3A8080:users
method: web
host: localhost (hostname)
port: 8080
path: [\"users\"]
resolution url: https://localhost:8080/users/.well-known/did.json"
		);
		Ok(())
	}

	#[test]
	fn test_inspect_key_and_domain() -> color_eyre::Result<()> {
		let out = run(&[
			"inspect",
			"did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme",
		])?;
		assert_eq!(
			out,
			"did: did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme
method: key
algorithm: secp256k1
public key: 03874c15c7fda20e539c6e5ba573c139884c351188799f5458b4b41f7924f235cd"
		);

		let out = run(&["inspect", "did:web:example.co.uk"])?;
		assert_eq!(
			out,
			"did: did:web:example.co.uk
method: web
host: example.co.uk (domain)
path: []
resolution url: https://example.co.uk/.well-known/did.json"
		);
		Ok(())
	}

	#[test]
	fn test_inspect_json() -> color_eyre::Result<()> {
		let out = run(&["inspect", "--json", "did:plc:yk4dd2qkboz2yv6tpubpc6co"])?;
		let value: serde_json::Value = serde_json::from_str(&out)?;
		assert_eq!(
			value,
			serde_json::json!({
				"did": "did:plc:yk4dd2qkboz2yv6tpubpc6co",
				"method": "plc",
				"identifier": "yk4dd2qkboz2yv6tpubpc6co",
			})
		);
		Ok(())
	}

	#[test]
	fn test_canonical_plc() {
		assert!(run(&["inspect", "did:plc:abcd"]).is_ok());
		assert!(run(&["inspect", "--canonical-plc", "did:plc:abcd"]).is_err());
	}

	#[test]
	fn test_resolution_url() -> color_eyre::Result<()> {
		assert_eq!(
			run(&["resolution-url", "did:web:example.com"])?,
			"https://example.com/.well-known/did.json"
		);
		assert!(run(&["resolution-url", "did:plc:yk4dd2qkboz2yv6tpubpc6co"]).is_err());
		Ok(())
	}

	#[test]
	fn test_from_url() -> color_eyre::Result<()> {
		assert_eq!(
			run(&["from-url", "https://example.com:3000/users/alice"])?,
			"did:web:example.com%3A3000:users:alice"
		);
		Ok(())
	}

	#[test]
	fn test_from_key() -> color_eyre::Result<()> {
		assert_eq!(
			run(&[
				"from-key",
				"--algo",
				"secp256k1",
				"03874c15c7fda20e539c6e5ba573c139884c351188799f5458b4b41f7924f235cd",
			])?,
			"did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme"
		);
		assert!(run(&["from-key", "abcd"]).is_err());
		assert!(run(&["from-key", "zz"]).is_err());
		Ok(())
	}
}
