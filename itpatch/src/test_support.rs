//! Test-only helpers for building a board tree with CubeMX interrupt files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::config::PatchConfig;

/// Trimmed `stm32*xx_it.c` as generated by CubeMX.
pub const IT_SOURCE: &str = "\
/* USER CODE BEGIN Header */
/**
  * @file    stm32xxxx_it.c
  * @brief   Interrupt Service Routines.
  */
/* USER CODE END Header */

#include \"main.h\"
#include \"stm32xxxx_it.h\"

/******************************************************************************/
/*           Cortex Processor Interruption and Exception Handlers          */
/******************************************************************************/
/**
  * @brief This function handles Non maskable interrupt.
  */
void NMI_Handler(void)
{
  /* USER CODE BEGIN NonMaskableInt_IRQn 0 */

  /* USER CODE END NonMaskableInt_IRQn 0 */
  /* USER CODE BEGIN NonMaskableInt_IRQn 1 */
  while (1)
  {
  }
  /* USER CODE END NonMaskableInt_IRQn 1 */
}

/**
  * @brief This function handles System service call via SWI instruction.
  */
void SVC_Handler(void)
{
  /* USER CODE BEGIN SVCall_IRQn 0 */

  /* USER CODE END SVCall_IRQn 0 */
  /* USER CODE BEGIN SVCall_IRQn 1 */

  /* USER CODE END SVCall_IRQn 1 */
}

/**
  * @brief This function handles Debug monitor.
  */
void DebugMon_Handler(void)
{
  /* USER CODE BEGIN DebugMonitor_IRQn 0 */

  /* USER CODE END DebugMonitor_IRQn 0 */
  /* USER CODE BEGIN DebugMonitor_IRQn 1 */

  /* USER CODE END DebugMonitor_IRQn 1 */
}

/**
  * @brief This function handles Pendable request for system service.
  */
void PendSV_Handler(void)
{
  /* USER CODE BEGIN PendSV_IRQn 0 */

  /* USER CODE END PendSV_IRQn 0 */
  /* USER CODE BEGIN PendSV_IRQn 1 */

  /* USER CODE END PendSV_IRQn 1 */
}

/**
  * @brief This function handles System tick timer.
  */
void SysTick_Handler(void)
{
  /* USER CODE BEGIN SysTick_IRQn 0 */

  /* USER CODE END SysTick_IRQn 0 */
  HAL_IncTick();
  /* USER CODE BEGIN SysTick_IRQn 1 */

  /* USER CODE END SysTick_IRQn 1 */
}

/* USER CODE BEGIN 1 */

/* USER CODE END 1 */
";

/// Trimmed `stm32*xx_it.h` as generated by CubeMX.
pub const IT_HEADER: &str = "\
#ifndef __STM32xxxx_IT_H
#define __STM32xxxx_IT_H

#ifdef __cplusplus
extern \"C\" {
#endif

void NMI_Handler(void);
void HardFault_Handler(void);
void SVC_Handler(void);
void DebugMon_Handler(void);
void PendSV_Handler(void);
void SysTick_Handler(void);

#ifdef __cplusplus
}
#endif

#endif /* __STM32xxxx_IT_H */
";

/// Temporary `MainMCU`-style root.
pub struct BoardTree {
    temp: TempDir,
}

/// Interrupt files written for one board.
pub struct BoardFiles {
    pub source: PathBuf,
    pub header: PathBuf,
}

impl BoardTree {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        fs::create_dir(temp.path().join("MainMCU")).context("create MainMCU")?;
        Ok(Self { temp })
    }

    /// Directory that holds the root (use as working directory for the CLI).
    pub fn workdir(&self) -> &Path {
        self.temp.path()
    }

    pub fn root(&self) -> PathBuf {
        self.temp.path().join("MainMCU")
    }

    /// Default config pointed at this tree's root.
    pub fn config(&self) -> PatchConfig {
        PatchConfig {
            root: self.root(),
            ..PatchConfig::default()
        }
    }

    /// Create `<root>/<board>/Core/{Src,Inc}/<family>_it.{c,h}`.
    pub fn add_board(&self, board: &str, family: &str) -> Result<BoardFiles> {
        let dir = self.root().join(board);
        let src_dir = dir.join("Core").join("Src");
        let inc_dir = dir.join("Core").join("Inc");
        fs::create_dir_all(&src_dir).with_context(|| format!("create {}", src_dir.display()))?;
        fs::create_dir_all(&inc_dir).with_context(|| format!("create {}", inc_dir.display()))?;

        let source = src_dir.join(format!("{family}_it.c"));
        let header = inc_dir.join(format!("{family}_it.h"));
        fs::write(&source, IT_SOURCE).with_context(|| format!("write {}", source.display()))?;
        fs::write(&header, IT_HEADER).with_context(|| format!("write {}", header.display()))?;
        fs::write(src_dir.join("main.c"), "int main(void) { return 0; }\n")
            .context("write main.c")?;

        Ok(BoardFiles { source, header })
    }
}
