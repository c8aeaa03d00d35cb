//! Quiz command implementation
//!
//! Plays (or shows) random Morse challenges and checks the user's guesses.

use anyhow::{bail, Result};
use colored::Colorize;
use dahdit_backend_audio::{ToneSynthesizer, DEFAULT_WORD_SEPARATOR};
use dahdit_codec::{Codec, Dictionary, DEFAULT_SEPARATOR};
use rand::Rng;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use super::sound::{create_synth, play_wav_bytes, print_backend_advisory, PlayOutcome};
use crate::input::{coded, load_dictionary};
use crate::quiz::{create_rng, pick_challenge, GuessOutcome, QuizSet, Scoreboard, Trial};

/// Settings for one quiz session.
#[derive(Debug, Clone)]
pub struct QuizOptions {
    /// Characters or words to draw challenges from.
    pub set: QuizSet,
    /// Number of trials.
    pub count: u32,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Show the Morse string instead of playing it.
    pub text: bool,
    /// Pause before each (re)play.
    pub delay: Duration,
    /// Render with the squared-duration sample count.
    pub legacy_timing: bool,
    /// Write each challenge here instead of playing it.
    pub file: Option<String>,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            set: QuizSet::Alphanum,
            count: 1,
            seed: None,
            text: false,
            delay: Duration::from_millis(2000),
            legacy_timing: false,
            file: None,
        }
    }
}

/// Puts a challenge in front of the user.
pub trait Presenter {
    /// Shows or plays `morse`; text goes to `out`.
    fn present(&mut self, morse: &str, out: &mut dyn Write) -> Result<()>;
}

/// Prints the Morse string.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn present(&mut self, morse: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", morse)?;
        Ok(())
    }
}

/// Renders the challenge as audio.
///
/// Plays on the default device, or writes to `file` when one is set. Without
/// a backend it warns once and prints the Morse string from then on.
pub struct AudioPresenter {
    synth: ToneSynthesizer,
    file: Option<PathBuf>,
    no_backend: bool,
}

impl AudioPresenter {
    /// Creates a presenter that plays with `synth`, or writes to `file`.
    pub fn new(synth: ToneSynthesizer, file: Option<PathBuf>) -> Self {
        Self {
            synth,
            file,
            no_backend: false,
        }
    }
}

impl Presenter for AudioPresenter {
    fn present(&mut self, morse: &str, out: &mut dyn Write) -> Result<()> {
        if self.no_backend {
            return TextPresenter.present(morse, out);
        }

        let wav = self.synth.synthesize(morse).map_err(coded)?.to_wav();
        if let Some(path) = &self.file {
            fs::write(path, &wav.wav_data)?;
            writeln!(out, "{} wrote {}", "ok".green(), path.display())?;
            return Ok(());
        }

        match play_wav_bytes(&wav.wav_data)? {
            PlayOutcome::Played { .. } => Ok(()),
            PlayOutcome::NoBackend { reason } => {
                print_backend_advisory(&reason, None);
                self.no_backend = true;
                TextPresenter.present(morse, out)
            }
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt<W: Write>(out: &mut W, text: &str) -> Result<()> {
    write!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}

/// Runs the quiz loop until `options.count` trials are done or input ends.
///
/// Returns the final score; the summary line is written to `out` as well.
pub fn run_session<R, W, P, G>(
    options: &QuizOptions,
    dictionary: &Dictionary,
    rng: &mut G,
    presenter: &mut P,
    input: &mut R,
    out: &mut W,
) -> Result<Scoreboard>
where
    R: BufRead,
    W: Write,
    P: Presenter + ?Sized,
    G: Rng + ?Sized,
{
    if options.set == QuizSet::Word && dictionary.words().is_empty() {
        bail!("the dictionary has no practice words");
    }

    let codec = Codec::new(dictionary.alphabet());
    let secs = options.delay.as_secs_f64();
    let mut board = Scoreboard::default();

    'trials: for _ in 0..options.count {
        writeln!(out, "READY...playing the code in {} secs", secs)?;
        thread::sleep(options.delay);

        let Some(challenge) = pick_challenge(options.set, dictionary.words(), rng) else {
            break;
        };
        let morse = codec.encode(&challenge, DEFAULT_SEPARATOR).map_err(coded)?;
        let mut trial = Trial::new(challenge);

        loop {
            presenter.present(&morse, &mut *out)?;
            prompt(out, "enter your guess : ")?;
            let Some(guess) = read_line(input)? else {
                board.record(&trial);
                break 'trials;
            };

            match trial.guess(&guess) {
                GuessOutcome::Correct => {
                    writeln!(out, "You got it!!!")?;
                    break;
                }
                GuessOutcome::Exhausted => {
                    writeln!(out, "Max chances used. The answer is {}", trial.answer())?;
                    break;
                }
                GuessOutcome::Wrong { .. } => {
                    prompt(out, "OOPS... wanna try again (y|n) ? ")?;
                    match read_line(input)? {
                        None => {
                            board.record(&trial);
                            break 'trials;
                        }
                        Some(answer) if answer.trim().eq_ignore_ascii_case("n") => break,
                        Some(_) => {}
                    }
                    writeln!(out, "playing the same code again in {} secs ... ", secs)?;
                    thread::sleep(options.delay);
                }
            }
        }

        board.record(&trial);
        prompt(out, "Press ENTER")?;
        if read_line(input)?.is_none() {
            break;
        }
    }

    writeln!(out)?;
    writeln!(out, "Score: {}/{}", board.correct, board.trials)?;
    Ok(board)
}

/// Run the quiz command
///
/// Reads guesses from stdin. End of input finishes the session early.
pub fn run(options: &QuizOptions, dictionary: Option<&str>) -> Result<ExitCode> {
    let dict = load_dictionary(dictionary)?;
    let mut rng = create_rng(options.seed);

    let mut presenter: Box<dyn Presenter> = if options.text {
        Box::new(TextPresenter)
    } else {
        let synth = create_synth(DEFAULT_WORD_SEPARATOR, options.legacy_timing)?;
        Box::new(AudioPresenter::new(
            synth,
            options.file.as_ref().map(PathBuf::from),
        ))
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        options,
        &dict,
        &mut rng,
        presenter.as_mut(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    Ok(ExitCode::SUCCESS)
}
