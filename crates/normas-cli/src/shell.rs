//! Interactive menu over a [`RegulationStore`].
//!
//! The shell reads one answer per line from any async reader and writes to
//! any async writer, so it runs on stdin/stdout in production and on
//! in-memory buffers in tests. Store failures are printed and the menu
//! continues; only I/O errors on the terminal itself end the session.

use std::fmt::Display;

use normas_core::{
  jurisdiction::Jurisdiction,
  regulation::{Category, NewRegulation, RegistrationNumber, Regulation, RegulationKind},
  store::RegulationStore,
};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::{input, render};

const MENU: &str = "\
===== Menú =====
1. Agregar normativa
2. Buscar normativas por palabras clave
3. Buscar normativa por número
4. Mostrar todas las normativas
5. Modificar descripción
6. Eliminar normativa
7. Salir
";

// ─── Menu options ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
  Add,
  SearchKeywords,
  SearchNumber,
  ListAll,
  UpdateDescription,
  Delete,
  Quit,
}

impl MenuOption {
  fn parse(input: &str) -> Option<Self> {
    match input.trim() {
      "1" => Some(Self::Add),
      "2" => Some(Self::SearchKeywords),
      "3" => Some(Self::SearchNumber),
      "4" => Some(Self::ListAll),
      "5" => Some(Self::UpdateDescription),
      "6" => Some(Self::Delete),
      "7" => Some(Self::Quit),
      _ => None,
    }
  }
}

/// What the menu loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
  Continue,
  /// Input ended or the user chose to leave.
  Quit,
}

// ─── Shell ────────────────────────────────────────────────────────────────────

pub struct Shell<'s, S, R, W> {
  store: &'s S,
  lines: Lines<R>,
  out:   W,
}

impl<'s, S, R, W> Shell<'s, S, R, W>
where
  S: RegulationStore,
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  pub fn new(store: &'s S, reader: R, out: W) -> Self {
    Self { store, lines: reader.lines(), out }
  }

  /// Run the menu until the user quits or input ends.
  pub async fn run(&mut self) -> anyhow::Result<()> {
    loop {
      self.say(MENU).await?;
      let Some(answer) = self.prompt("Seleccione una opción: ").await? else {
        break;
      };

      let step = match MenuOption::parse(&answer) {
        Some(MenuOption::Add) => self.add_regulation().await?,
        Some(MenuOption::SearchKeywords) => self.search_by_keywords().await?,
        Some(MenuOption::SearchNumber) => self.search_by_number().await?,
        Some(MenuOption::ListAll) => self.list_all().await?,
        Some(MenuOption::UpdateDescription) => self.update_description().await?,
        Some(MenuOption::Delete) => self.delete_regulation().await?,
        Some(MenuOption::Quit) => Step::Quit,
        None => {
          self.say("Opción inválida. Intente nuevamente.\n\n").await?;
          Step::Continue
        }
      };

      if step == Step::Quit {
        break;
      }
    }
    Ok(())
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  async fn add_regulation(&mut self) -> anyhow::Result<Step> {
    let Some(kind) = self
      .prompt_choice("Tipo de normativa", RegulationKind::parse)
      .await?
    else {
      return Ok(Step::Quit);
    };
    let Some(number) = self.prompt("Número de normativa: ").await? else {
      return Ok(Step::Quit);
    };
    let Some(date) = self.prompt("Fecha: ").await? else {
      return Ok(Step::Quit);
    };
    let Some(description) = self.prompt("Descripción: ").await? else {
      return Ok(Step::Quit);
    };
    let Some(category) = self.prompt_choice("Categoría", Category::parse).await? else {
      return Ok(Step::Quit);
    };
    let Some(jurisdiction) = self
      .prompt("Jurisdicción (Nacional o Provincial): ")
      .await?
    else {
      return Ok(Step::Quit);
    };
    let Some(jurisdiction) = Jurisdiction::parse_input(&jurisdiction) else {
      self
        .say("Jurisdicción inválida. La normativa no será agregada.\n")
        .await?;
      return Ok(Step::Continue);
    };
    let Some(keywords) = self
      .prompt("Palabras clave (separadas por comas): ")
      .await?
    else {
      return Ok(Step::Quit);
    };

    let input = NewRegulation {
      kind,
      number: number.trim().to_owned(),
      date,
      description,
      category,
      jurisdiction_id: jurisdiction.id().to_owned(),
      keywords: input::split_keywords(&keywords),
    };

    match self.store.insert_regulation(input).await {
      Ok(registration) => {
        self
          .say(&format!(
            "Normativa agregada correctamente. Número de registro: {registration}\n"
          ))
          .await?
      }
      Err(e) => self.report(&e).await?,
    }
    Ok(Step::Continue)
  }

  async fn search_by_keywords(&mut self) -> anyhow::Result<Step> {
    let Some(answer) = self
      .prompt("Ingrese las palabras clave separadas por comas: ")
      .await?
    else {
      return Ok(Step::Quit);
    };

    let keywords = input::split_keywords(&answer);
    if keywords.is_empty() {
      self.say("Debe ingresar al menos una palabra clave.\n").await?;
      return Ok(Step::Continue);
    }

    let result = self.store.search_by_keywords(&keywords).await;
    self.show(result, "Normativas encontradas:").await?;
    Ok(Step::Continue)
  }

  async fn search_by_number(&mut self) -> anyhow::Result<Step> {
    let Some(number) = self.prompt("Número de normativa: ").await? else {
      return Ok(Step::Quit);
    };

    let result = self.store.search_by_number(number.trim()).await;
    self.show(result, "Normativas encontradas:").await?;
    Ok(Step::Continue)
  }

  async fn list_all(&mut self) -> anyhow::Result<Step> {
    let result = self.store.list_all().await;
    self.show(result, "Todas las normativas:").await?;
    Ok(Step::Continue)
  }

  async fn update_description(&mut self) -> anyhow::Result<Step> {
    let Some(registration) = self.prompt_registration().await? else {
      return Ok(Step::Quit);
    };
    let Some(registration) = registration else {
      return Ok(Step::Continue);
    };
    let Some(description) = self.prompt("Nueva descripción: ").await? else {
      return Ok(Step::Quit);
    };

    match self.store.update_description(registration, description).await {
      Ok(true) => self.say("Descripción actualizada correctamente.\n").await?,
      Ok(false) => self.say_missing(registration).await?,
      Err(e) => self.report(&e).await?,
    }
    Ok(Step::Continue)
  }

  async fn delete_regulation(&mut self) -> anyhow::Result<Step> {
    let Some(registration) = self.prompt_registration().await? else {
      return Ok(Step::Quit);
    };
    let Some(registration) = registration else {
      return Ok(Step::Continue);
    };

    match self.store.delete_regulation(registration).await {
      Ok(true) => self.say("Normativa eliminada correctamente.\n").await?,
      Ok(false) => self.say_missing(registration).await?,
      Err(e) => self.report(&e).await?,
    }
    Ok(Step::Continue)
  }

  // ── Prompts ───────────────────────────────────────────────────────────────

  /// Print `label` and read one line. `None` once input is exhausted.
  async fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
    self.say(label).await?;
    let line = self.lines.next_line().await?;
    Ok(line.map(|l| l.trim_end_matches('\r').to_owned()))
  }

  /// Ask until the answer parses as one of `T`'s variants.
  async fn prompt_choice<T, E>(
    &mut self,
    label: &str,
    parse: fn(&str) -> Result<T, E>,
  ) -> anyhow::Result<Option<T>>
  where
    T: IntoEnumIterator + Display,
  {
    let options = input::options::<T>();
    loop {
      let Some(answer) = self.prompt(&format!("{label} ({options}): ")).await? else {
        return Ok(None);
      };
      match parse(&answer) {
        Ok(value) => return Ok(Some(value)),
        Err(_) => {
          self
            .say(&format!("Valor inválido. Opciones válidas: {options}\n"))
            .await?
        }
      }
    }
  }

  /// Outer `None`: input ended. Inner `None`: the answer was not a valid
  /// registration number (already reported).
  async fn prompt_registration(&mut self) -> anyhow::Result<Option<Option<RegistrationNumber>>> {
    let Some(answer) = self.prompt("Número de registro: ").await? else {
      return Ok(None);
    };
    let registration = input::parse_registration(&answer);
    if registration.is_none() {
      self.say("Número de registro inválido.\n").await?;
    }
    Ok(Some(registration))
  }

  // ── Output ────────────────────────────────────────────────────────────────

  async fn say(&mut self, text: &str) -> anyhow::Result<()> {
    self.out.write_all(text.as_bytes()).await?;
    self.out.flush().await?;
    Ok(())
  }

  async fn say_missing(&mut self, registration: RegistrationNumber) -> anyhow::Result<()> {
    self
      .say(&format!(
        "No existe una normativa con número de registro {registration}.\n"
      ))
      .await
  }

  async fn show(
    &mut self,
    result: Result<Vec<Regulation>, S::Error>,
    heading: &str,
  ) -> anyhow::Result<()> {
    match result {
      Ok(found) if found.is_empty() => self.say("No se encontraron normativas.\n").await,
      Ok(found) => {
        self
          .say(&format!("{heading}\n{}", render::regulations(&found)))
          .await
      }
      Err(e) => self.report(&e).await,
    }
  }

  async fn report(&mut self, err: &S::Error) -> anyhow::Result<()> {
    tracing::warn!(error = %err, "store operation failed");
    self.say(&format!("Error: {err}\n")).await
  }
}
