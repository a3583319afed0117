//! This module is in charge of printing classification results and decay
//! chains in a human-readable way

use crate::{
    config::Configuration,
    momentum::FourMomentum,
    numeric::{units::GEV, Float},
    particle::ParticleRef,
    tally::ClassificationTally,
};
use std::io::{Result, Write};

/// Number of significant digits of per-event averages
const SIG_DIGITS: usize = 6;

/// Write the configuration and the classification tally of a run
pub fn write_tally(
    writer: &mut impl Write,
    cfg: &Configuration,
    tally: &ClassificationTally,
) -> Result<()> {
    writeln!(writer, "{cfg}")?;
    writeln_kv(writer, "---------------------------------------------")?;
    writeln_kv(writer, ("Number of events", tally.events))?;
    writeln_kv(writer, ("... with a Higgs Dalitz decay", tally.dalitz_events))?;
    writeln_kv(writer, "---------------------------------------------")?;
    let groups = [
        ("Photons", tally.photons),
        ("Electrons", tally.electrons),
        ("Muons", tally.muons),
        ("Hadrons and their decay", tally.hadrons),
        ("Photons from Higgs", tally.photons_from_higgs),
        ("Higgs decay products", tally.higgs_decay),
        ("B-hadrons", tally.b_hadrons),
        ("D-hadrons", tally.d_hadrons),
        ("Muons from B-hadrons", tally.muons_from_bs),
        ("Jets", tally.jets),
        ("... b-jets", tally.b_jets),
        ("... c-jets", tally.c_jets),
        ("... light jets", tally.light_jets),
    ];
    for (name, count) in groups {
        writeln_kv(
            writer,
            (
                name,
                Count {
                    total: count,
                    per_event: tally.per_event(count),
                },
            ),
        )?;
    }
    Ok(())
}

/// Write a particle, then recursively its parents and children up to some
/// depth
///
/// Each level of the decay chain is indented by three more spaces.
///
pub fn write_decay_chain(
    writer: &mut impl Write,
    particle: ParticleRef,
    comment: &str,
    child_depth: usize,
    parent_depth: usize,
) -> Result<()> {
    write_decay_chain_impl(writer, particle, comment, child_depth, parent_depth, 0)
}

fn write_decay_chain_impl(
    writer: &mut dyn Write,
    particle: ParticleRef,
    comment: &str,
    child_depth: usize,
    parent_depth: usize,
    current_depth: usize,
) -> Result<()> {
    let indent = " ".repeat(3 * current_depth);
    writeln!(
        writer,
        "{indent}Truth part. ID:{:5}, status: {:2}, {}  {comment}",
        particle.pdg_id,
        particle.status,
        four_momentum_as_text(&particle)
    )?;
    if child_depth == 0 && parent_depth == 0 {
        return Ok(());
    }

    writeln!(
        writer,
        "{indent}-> {} parent and {} children",
        particle.num_parents(),
        particle.num_children()
    )?;
    let (next_child_depth, next_parent_depth) =
        (child_depth.saturating_sub(1), parent_depth.saturating_sub(1));
    if parent_depth > 0 {
        for (n, parent) in particle.parents().enumerate() {
            write_decay_chain_impl(
                writer,
                parent,
                &format!("parent {} of {comment}", n + 1),
                next_child_depth,
                next_parent_depth,
                current_depth + 1,
            )?;
        }
    }
    if child_depth > 0 {
        for (n, child) in particle.children().enumerate() {
            write_decay_chain_impl(
                writer,
                child,
                &format!("child {} of {comment}", n + 1),
                next_child_depth,
                next_parent_depth,
                current_depth + 1,
            )?;
        }
    }
    Ok(())
}

/// Short description of a 4-momentum in collider coordinates, in GeV
pub fn four_momentum_as_text(p: &impl FourMomentum) -> String {
    format!(
        "(pT, y, phi, m) = ({:6.1}, {:5.2}, {:5.2}, {:5.1}) GeV",
        p.pt() / GEV,
        p.rapidity(),
        p.phi(),
        p.mass() / GEV
    )
}

/// Text output facility for key-value result listings
fn writeln_kv(writer: &mut dyn Write, data: impl WriteKv) -> Result<()> {
    write!(writer, " ")?;
    data.write(writer)?;
    writeln!(writer)
}

/// Trait implemented by things which can appear in a result listing
trait WriteKv: Sized {
    /// Write down `self` using the listing's style
    fn write(self, writer: &mut dyn Write) -> Result<()>;
}

impl WriteKv for &str {
    fn write(self, writer: &mut dyn Write) -> Result<()> {
        write!(writer, "{self}")
    }
}

impl WriteKv for usize {
    fn write(self, writer: &mut dyn Write) -> Result<()> {
        write!(writer, "{self}")
    }
}

/// Group size, summed over events and averaged per event
struct Count {
    total: usize,
    per_event: Float,
}

impl WriteKv for Count {
    fn write(self, writer: &mut dyn Write) -> Result<()> {
        write!(writer, "{} (", self.total)?;
        write_engineering(writer, self.per_event, SIG_DIGITS)?;
        write!(writer, " per event)")
    }
}

impl<T: WriteKv> WriteKv for (&str, T) {
    // Key-value output that uses fixed-size columns for better readability
    fn write(self, writer: &mut dyn Write) -> Result<()> {
        write!(writer, "{:<31}: ", self.0)?;
        self.1.write(writer)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this method switches
/// between naive and scientific notation for floating-point numbers when the
/// number being printed becomes so small that printing leading zeroes could end
/// up larger than the scientific notation, or so large that we would be forced
/// to print more significant digits than requested.
///
fn write_engineering(writer: &mut dyn Write, x: Float, sig_digits: usize) -> Result<()> {
    let mut precision = sig_digits - 1;
    if x == 0. {
        // Zero is special because you can't take its log
        return write!(writer, "0");
    }
    let log_x = x.abs().log10();
    if (-3. ..sig_digits as Float).contains(&log_x) {
        // Rust's precision is a number of digits after the decimal point, so
        // it must be adjusted to keep the number of significant digits fixed.
        // Numbers below 1 get one more, since the leading zero is not
        // significant.
        precision = (precision as isize - log_x.trunc() as isize) as usize;
        if log_x < 0. {
            precision += 1
        }

        // Trailing zeros and decimal point are dropped, like %g does
        let str_with_zeros = format!("{:.1$}", x, precision);
        if str_with_zeros.contains('.') {
            write!(
                writer,
                "{}",
                str_with_zeros.trim_end_matches('0').trim_end_matches('.')
            )
        } else {
            write!(writer, "{str_with_zeros}")
        }
    } else {
        write!(writer, "{:.1$e}", x, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        momentum::from_cartesian,
        particle::{DecayGraphBuilder, TruthParticle},
        testing::{decayed, stable},
    };
    use pretty_assertions::assert_eq;

    fn engineering(x: Float) -> String {
        let mut out = Vec::new();
        write_engineering(&mut out, x, SIG_DIGITS).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn engineering_notation() {
        assert_eq!(engineering(0.), "0");
        assert_eq!(engineering(1.5), "1.5");
        assert_eq!(engineering(2.), "2");
        assert_eq!(engineering(0.25), "0.25");
        assert_eq!(engineering(1.5e-5), "1.50000e-5");
        assert_eq!(engineering(999_999.), "999999");
        assert_eq!(engineering(1e6), "1.00000e6");
    }

    #[test]
    fn decay_chain() {
        let mut builder = DecayGraphBuilder::new();
        let mut higgs = decayed(25, 1);
        higgs.status = 62;
        let higgs = builder.add(higgs);
        let photon = builder.add(TruthParticle::new(
            22,
            1,
            2,
            from_cartesian(3000., 4000., 0., 5000.),
        ));
        let soft_photon = builder.add(stable(22, 3));
        builder.link(higgs, photon).link(higgs, soft_photon);
        let particles = builder.build().unwrap();

        let mut out = Vec::new();
        write_decay_chain(&mut out, particles.get(higgs).unwrap(), "Higgs", 1, 0).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\
Truth part. ID:   25, status: 62, (pT, y, phi, m) = (   0.0,  0.00,  0.00,   0.0) GeV  Higgs
-> 0 parent and 2 children
   Truth part. ID:   22, status:  1, (pT, y, phi, m) = (   5.0,  0.00,  0.93,   0.0) GeV  child 1 of Higgs
   Truth part. ID:   22, status:  1, (pT, y, phi, m) = (   0.0,  0.00,  0.00,   0.0) GeV  child 2 of Higgs
"
        );

        let mut out = Vec::new();
        write_decay_chain(&mut out, particles.get(photon).unwrap(), "photon", 0, 2).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\
Truth part. ID:   22, status:  1, (pT, y, phi, m) = (   5.0,  0.00,  0.93,   0.0) GeV  photon
-> 1 parent and 0 children
   Truth part. ID:   25, status: 62, (pT, y, phi, m) = (   0.0,  0.00,  0.00,   0.0) GeV  parent 1 of photon
   -> 0 parent and 2 children
"
        );
    }

    #[test]
    fn tally_listing() {
        let tally = ClassificationTally {
            events: 4,
            dalitz_events: 1,
            photons: 6,
            jets: 5,
            light_jets: 5,
            ..ClassificationTally::default()
        };
        let mut out = Vec::new();
        write_tally(&mut out, &Configuration::default(), &tally).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("JET_PT_CUT     : 0 GeV\n"));
        assert!(text.contains(&format!(" {:<31}: 4\n", "Number of events")));
        assert!(text.contains(&format!(" {:<31}: 6 (1.5 per event)\n", "Photons")));
        assert!(text.contains(&format!(" {:<31}: 0 (0 per event)\n", "... c-jets")));
        assert!(text.ends_with(&format!(" {:<31}: 5 (1.25 per event)\n", "... light jets")));
    }
}
