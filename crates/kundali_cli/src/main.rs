use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use kundali_base::{
    ALL_GRAHAS, ALL_RASHIS, AshtakootaResult, AyanamshaSystem, ChartResult,
    ChartState, MoonPlacement, ShadbalaBreakdown, VimshottariDasha, ashtakoota,
    nakshatra_from_longitude, rashi_from_longitude, vimshottari_dasha,
};
use kundali_engine::{
    BirthInput, GeoLocation, SampledEphemeris, ScanConfig, ScanReport, ScanStep,
    bala_range_scan, compatibility_for_births, kundali_for_birth, local_from_jd,
};
use log::debug;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "kundali", version, about = "Vedic chart strength, dasha and matching")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BirthArgs {
    /// Local civil date-time (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long)]
    date: String,
    /// Hours east of UTC in force at the birthplace
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    utc_offset: f64,
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Ayanamsha system: lahiri, raman, krishnamurti
    #[arg(long, default_value = "lahiri")]
    ayanamsha: AyanamshaSystem,
}

impl BirthArgs {
    fn to_birth(&self) -> Result<BirthInput> {
        let local = parse_local(&self.date)?;
        Ok(BirthInput::from_local(
            local,
            self.utc_offset,
            GeoLocation::new(self.lat, self.lon),
            self.ayanamsha,
        ))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Full chart: placements, Shadbala, Bhava Bala and current dasha
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Sampled ephemeris table (JSON)
        #[arg(long)]
        ephemeris: PathBuf,
    },
    /// Vimshottari timeline from a sidereal Moon longitude
    Dasha {
        /// Sidereal Moon longitude in degrees
        #[arg(long)]
        moon: f64,
        /// Local civil birth date-time (YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        date: String,
        /// Hours east of UTC
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        utc_offset: f64,
        /// Also list antardashas
        #[arg(long)]
        antardashas: bool,
    },
    /// Ashtakoota compatibility, from Moon longitudes or two births
    Match {
        /// Sidereal Moon longitude of the first chart
        #[arg(long, requires = "moon_b", conflicts_with_all = ["first", "second"])]
        moon_a: Option<f64>,
        /// Sidereal Moon longitude of the second chart
        #[arg(long, requires = "moon_a")]
        moon_b: Option<f64>,
        /// First birth as DATE,UTC_OFFSET,LAT,LON
        #[arg(long, requires_all = ["second", "ephemeris"], allow_hyphen_values = true)]
        first: Option<String>,
        /// Second birth as DATE,UTC_OFFSET,LAT,LON
        #[arg(long, requires = "first", allow_hyphen_values = true)]
        second: Option<String>,
        /// Ayanamsha system for births
        #[arg(long, default_value = "lahiri")]
        ayanamsha: AyanamshaSystem,
        /// Sampled ephemeris table (JSON)
        #[arg(long)]
        ephemeris: Option<PathBuf>,
    },
    /// Shadbala and Bhava Bala over a date range
    Scan {
        /// First local date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last local date, inclusive
        #[arg(long)]
        end: String,
        /// Sample every hour instead of at local noon
        #[arg(long)]
        hourly: bool,
        /// Hours east of UTC
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        utc_offset: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value = "lahiri")]
        ayanamsha: AyanamshaSystem,
        /// Sampled ephemeris table (JSON)
        #[arg(long)]
        ephemeris: PathBuf,
        /// Number of strongest instants to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Rashi from sidereal longitude
    Rashi {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Nakshatra from sidereal longitude
    Nakshatra {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json = cli.json;

    match cli.command {
        Commands::Chart { birth, ephemeris } => {
            let provider = load_ephemeris(&ephemeris)?;
            let birth = birth.to_birth()?;
            let result = kundali_for_birth(&provider, &birth).context("chart computation failed")?;
            if json {
                print_json(&result)?;
            } else {
                print_chart(&birth, &result);
            }
        }

        Commands::Dasha {
            moon,
            date,
            utc_offset,
            antardashas,
        } => {
            let local = parse_local(&date)?;
            let birth = BirthInput::from_local(
                local,
                utc_offset,
                GeoLocation::default(),
                AyanamshaSystem::default(),
            );
            let moment = birth.birth_moment()?;
            let dasha = vimshottari_dasha(moon, moment.jd_ut)?;
            if json {
                print_json(&dasha)?;
            } else {
                print_dasha(&dasha, utc_offset, antardashas);
            }
        }

        Commands::Match {
            moon_a,
            moon_b,
            first,
            second,
            ayanamsha,
            ephemeris,
        } => {
            let score = match (moon_a, moon_b, first, second, ephemeris) {
                (Some(a), Some(b), _, _, _) => {
                    ashtakoota(placement_from_longitude(a), placement_from_longitude(b))
                }
                (_, _, Some(first), Some(second), Some(path)) => {
                    let provider = load_ephemeris(&path)?;
                    let a = parse_birth_spec(&first, ayanamsha)?;
                    let b = parse_birth_spec(&second, ayanamsha)?;
                    compatibility_for_births(&provider, &a, &b)
                        .context("compatibility computation failed")?
                        .score
                }
                _ => bail!("give --moon-a/--moon-b, or --first/--second with --ephemeris"),
            };
            if json {
                print_json(&score)?;
            } else {
                print_match(&score);
            }
        }

        Commands::Scan {
            start,
            end,
            hourly,
            utc_offset,
            lat,
            lon,
            ayanamsha,
            ephemeris,
            top,
        } => {
            let provider = load_ephemeris(&ephemeris)?;
            let config = ScanConfig {
                start: parse_date(&start)?,
                end: parse_date(&end)?,
                step: if hourly { ScanStep::Hourly } else { ScanStep::Daily },
                location: GeoLocation::new(lat, lon),
                utc_offset_hours: utc_offset,
                ayanamsha,
            };
            let report = bala_range_scan(&provider, &config).context("scan failed")?;
            if json {
                print_json(&report)?;
            } else {
                print_scan(&report, top);
            }
        }

        Commands::Rashi { lon } => {
            let info = rashi_from_longitude(lon);
            let dms = info.dms;
            println!(
                "{} ({}) - {} deg {} min {:.1} sec ({:.4} deg in rashi)",
                info.rashi.name(),
                info.rashi.western_name(),
                dms.degrees,
                dms.minutes,
                dms.seconds,
                info.degrees_in_rashi
            );
        }

        Commands::Nakshatra { lon } => {
            let info = nakshatra_from_longitude(lon);
            println!(
                "{} (index {}) - Pada {} ({:.4} deg in nakshatra, {:.1}% elapsed)",
                info.nakshatra.name(),
                info.nakshatra_index,
                info.pada,
                info.degrees_in_nakshatra,
                info.elapsed_fraction * 100.0
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn parse_local(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .with_context(|| format!("invalid date-time '{s}', expected YYYY-MM-DDTHH:MM[:SS]"))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Parse `DATE,UTC_OFFSET,LAT,LON`.
fn parse_birth_spec(s: &str, ayanamsha: AyanamshaSystem) -> Result<BirthInput> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [date, offset, lat, lon] = parts.as_slice() else {
        bail!("invalid birth '{s}', expected DATE,UTC_OFFSET,LAT,LON");
    };
    let number = |label: &str, v: &str| -> Result<f64> {
        v.parse::<f64>()
            .with_context(|| format!("invalid {label} '{v}' in birth '{s}'"))
    };
    Ok(BirthInput::from_local(
        parse_local(date)?,
        number("UTC offset", *offset)?,
        GeoLocation::new(number("latitude", *lat)?, number("longitude", *lon)?),
        ayanamsha,
    ))
}

fn load_ephemeris(path: &Path) -> Result<SampledEphemeris> {
    let table = SampledEphemeris::from_json_file(path)?;
    debug!("loaded {} ephemeris samples from {}", table.len(), path.display());
    Ok(table)
}

fn placement_from_longitude(lon: f64) -> MoonPlacement {
    MoonPlacement::new(
        rashi_from_longitude(lon).rashi_index,
        nakshatra_from_longitude(lon).nakshatra_index,
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn rashi_name(index: u8) -> &'static str {
    ALL_RASHIS[usize::from(index % 12)].name()
}

fn format_jd(jd: f64, utc_offset: f64) -> String {
    local_from_jd(jd, utc_offset)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("JD {jd:.4}"))
}

fn print_chart(birth: &BirthInput, result: &ChartResult) {
    let chart = &result.chart;
    println!(
        "Birth: {}-{:02}-{:02} {:02}:{:02}:{:02} (UTC{:+}) at {:.4}, {:.4}",
        birth.year,
        birth.month,
        birth.day,
        birth.hour,
        birth.minute,
        birth.second,
        birth.utc_offset_hours,
        birth.location.latitude_deg,
        birth.location.longitude_deg
    );
    println!("JD (UT): {:.6}   Ayanamsha ({}): {:.4}", chart.jd_ut, birth.ayanamsha, chart.ayanamsha);
    println!(
        "Lagna:   {} {:.4} deg (navamsa {})",
        chart.ascendant.rashi.rashi.name(),
        chart.ascendant.rashi.degrees_in_rashi,
        rashi_name(chart.ascendant.navamsa)
    );
    println!();
    print_placements(chart);
    println!();

    println!("Shadbala (rupas):");
    for g in ALL_GRAHAS {
        print_shadbala_row(result.shadbala.get(g));
    }
    println!("  Total: {:.2}", result.shadbala.total_rupas());
    println!();

    println!("Bhava Bala (rupas):");
    for e in &result.bhava_bala.entries {
        let occupants: Vec<&str> = e.occupants.iter().map(|g| g.name()).collect();
        println!(
            "  {:>2} {:<10} lord {:<8} (H{:>2}) {:>6.2} {:<11} {}",
            e.house,
            rashi_name(e.sign),
            e.lord.name(),
            e.lord_house,
            e.total_rupas,
            e.rating.name(),
            occupants.join(", ")
        );
    }
    println!();

    if let Some((md, ad)) = result.dasha.active_at(chart.jd_ut) {
        print!("Dasha at birth: {}", md.lord.name());
        if let Some(ad) = ad {
            print!(" / {}", ad.lord.name());
        }
        println!(" (balance {:.4} years)", result.dasha.balance_years);
    }
}

fn print_placements(chart: &ChartState) {
    println!("Graha      Rashi        Deg       Nakshatra          H  Flags");
    for b in &chart.bodies {
        let nak = b.nakshatra();
        let mut flags = Vec::new();
        if b.is_retrograde {
            flags.push("R");
        }
        if b.is_exalted {
            flags.push("Exalted");
        }
        if b.is_debilitated {
            flags.push("Debilitated");
        }
        if b.is_combust {
            flags.push("Combust");
        }
        if b.is_vargottama {
            flags.push("Vargottama");
        }
        println!(
            "{:<10} {:<12} {:>8.4}  {:<16} {}  {:>2}  {}",
            b.graha.name(),
            b.rashi.rashi.name(),
            b.rashi.degrees_in_rashi,
            nak.nakshatra.name(),
            nak.pada,
            b.house,
            flags.join(" ")
        );
    }
    for u in &chart.upagrahas {
        println!(
            "{:<10} {:<12} {:>8.4}  {:<16}    {:>2}",
            u.upagraha.name(),
            rashi_name(u.rashi_index),
            u.sidereal_lon % 30.0,
            "",
            u.house
        );
    }
}

fn print_shadbala_row(e: &ShadbalaBreakdown) {
    println!(
        "  {:<8} sthana {:>6.1} dig {:>5.1} kala {:>6.1} cheshta {:>5.1} naisargika {:>5.1} drik {:>6.1} = {:>5.2} / {:>4.2} ({:.2}) {}",
        e.graha.name(),
        e.sthana.total,
        e.dig,
        e.kala.total,
        e.cheshta,
        e.naisargika,
        e.drik,
        e.total_rupas,
        e.required_rupas,
        e.ratio,
        e.label.name()
    );
}

fn print_dasha(dasha: &VimshottariDasha, utc_offset: f64, antardashas: bool) {
    println!(
        "Moon {:.4} deg: {} pada {} ({:.2}% elapsed)",
        dasha.moon_longitude,
        dasha.nakshatra_name,
        dasha.pada,
        dasha.elapsed_fraction * 100.0
    );
    println!(
        "Balance of first dasha: {:.4} years (elapsed {:.4})",
        dasha.balance_years, dasha.elapsed_years
    );
    for md in &dasha.mahadashas {
        println!(
            "{:<8} {} -> {}  {:>7.3} y{}",
            md.lord.name(),
            format_jd(md.start_jd, utc_offset),
            format_jd(md.end_jd, utc_offset),
            md.years,
            if md.is_current { "  *" } else { "" }
        );
        if antardashas {
            for ad in &md.antardashas {
                println!(
                    "    {:<8} {} -> {}  {:>7.3} y",
                    ad.lord.name(),
                    format_jd(ad.start_jd, utc_offset),
                    format_jd(ad.end_jd, utc_offset),
                    ad.years
                );
            }
        }
    }
}

fn print_match(score: &AshtakootaResult) {
    for item in &score.items {
        println!(
            "  {:<13} {:>4.1} / {:<3.0} {}",
            item.category, item.score, item.max, item.description
        );
    }
    println!("  Total:        {:>4.1} / {:.0}", score.total, score.max_total);
}

fn print_scan(report: &ScanReport, top: usize) {
    println!(
        "{} instants computed, {} skipped",
        report.samples.len(),
        report.skipped
    );
    let mut ranked: Vec<_> = report.samples.iter().collect();
    ranked.sort_by(|a, b| b.shadbala_total.total_cmp(&a.shadbala_total));
    for (i, s) in ranked.iter().take(top).enumerate() {
        println!(
            "{:>3}. {}  lagna {:<10} shadbala {:>7.2}  bhava {:>7.2}  strong {}/9",
            i + 1,
            s.local.format("%Y-%m-%d %H:%M"),
            rashi_name(s.lagna_sign),
            s.shadbala_total,
            s.bhava_total,
            s.strong_count
        );
    }
    if let Some(best) = report.best() {
        let planets: Vec<String> = ALL_GRAHAS
            .iter()
            .zip(best.shadbala_rupas)
            .map(|(g, r)| format!("{} {:.2}", g.name(), r))
            .collect();
        println!("Best: {}  {}", best.local.format("%Y-%m-%d %H:%M"), planets.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_birth_spec() {
        let b = parse_birth_spec("1990-01-10T06:30,5.5,28.61,-77.2", AyanamshaSystem::Raman)
            .unwrap();
        assert_eq!((b.year, b.month, b.day, b.hour, b.minute), (1990, 1, 10, 6, 30));
        assert!((b.utc_offset_hours - 5.5).abs() < 1e-12);
        assert!((b.location.longitude_deg + 77.2).abs() < 1e-12);
        assert_eq!(b.ayanamsha, AyanamshaSystem::Raman);
    }

    #[test]
    fn rejects_short_birth_spec() {
        assert!(parse_birth_spec("1990-01-10T06:30,5.5", AyanamshaSystem::Lahiri).is_err());
    }

    #[test]
    fn date_time_formats() {
        assert!(parse_local("2000-01-01T12:00:00").is_ok());
        assert!(parse_local("2000-01-01T12:00").is_ok());
        assert!(parse_local("2000-01-01 12:00:00").is_ok());
        assert!(parse_local("01/01/2000").is_err());
    }

    #[test]
    fn moon_placement_from_longitude() {
        let p = placement_from_longitude(200.0);
        assert_eq!(p.rashi, 6);
        assert_eq!(p.nakshatra, 15);
    }
}
